// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, anchors and retention.

use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;

/// Identifier for a node in a [`Scene`](crate::Scene) (generational).
///
/// A `NodeId` names one slot of the scene's arena together with the generation
/// the slot had when the node was created. Once the node is destroyed the id is
/// stale forever, even if the slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Generation of the slot this id refers to.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.0, self.1)
    }
}

bitflags::bitflags! {
    /// Node state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node and its subtree are rendered and hit tested.
        const VISIBLE     = 0b0000_0001;
        /// Node reacts to input and can take keyboard focus.
        const ENABLED     = 0b0000_0010;
        /// Node participates in pointer hit testing.
        const CLICKABLE   = 0b0000_0100;
        /// Node takes part in tab traversal.
        const TAB_ENABLED = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED | Self::CLICKABLE
    }
}

bitflags::bitflags! {
    /// Parent edges a node keeps its distance to when the parent is resized.
    ///
    /// | horizontal anchors | effect of a parent width change `dw` |
    /// |---|---|
    /// | left + right | width grows by `dw` |
    /// | right | x shifts by `dw` |
    /// | left | nothing |
    /// | neither | x shifts by `dw / 2` |
    ///
    /// Vertical anchors behave the same way with top/bottom and `dh`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Anchors: u8 {
        /// Keep the distance to the parent's left edge.
        const LEFT   = 0b0001;
        /// Keep the distance to the parent's top edge.
        const TOP    = 0b0010;
        /// Keep the distance to the parent's right edge.
        const RIGHT  = 0b0100;
        /// Keep the distance to the parent's bottom edge.
        const BOTTOM = 0b1000;
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::LEFT | Self::TOP
    }
}

/// What happens to a node once it has been detached from the tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    /// Destroy the node as soon as it is safe to do so.
    #[default]
    AutoDestroy,
    /// Keep the node for its grace period, then let the collector destroy it.
    Grace,
    /// Keep the node until it is destroyed explicitly.
    Retain,
}

impl RetentionPolicy {
    /// Configuration spelling of this policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoDestroy => "destroy",
            Self::Grace => "grace",
            Self::Retain => "retain",
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetentionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destroy" => Ok(Self::AutoDestroy),
            "grace" => Ok(Self::Grace),
            "retain" => Ok(Self::Retain),
            other => Err(ConfigError::InvalidValue {
                key: "orphan_policy".into(),
                reason: format!("expected \"destroy\", \"grace\" or \"retain\", got {other:?}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_visible_enabled_clickable() {
        let flags = NodeFlags::default();
        assert!(flags.contains(NodeFlags::VISIBLE | NodeFlags::ENABLED | NodeFlags::CLICKABLE));
        assert!(!flags.contains(NodeFlags::TAB_ENABLED));
    }

    #[test]
    fn retention_policy_parses_config_spelling() {
        for policy in [
            RetentionPolicy::AutoDestroy,
            RetentionPolicy::Grace,
            RetentionPolicy::Retain,
        ] {
            assert_eq!(policy.as_str().parse::<RetentionPolicy>().unwrap(), policy);
        }
        assert!("forever".parse::<RetentionPolicy>().is_err());
    }

    #[test]
    fn node_id_display_shows_slot_and_generation() {
        assert_eq!(NodeId::new(3, 2).to_string(), "3v2");
    }
}

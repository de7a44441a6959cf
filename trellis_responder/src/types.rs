// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared types: phases, dispatch entries, outcomes, and parent lookup.

/// Propagation phase of a dispatch entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root→target, excluding the target.
    Capture,
    /// The target itself.
    Target,
    /// Target→root, excluding the target.
    Bubble,
}

impl Phase {
    /// Whether a listener registered with `use_capture` runs in this phase.
    pub const fn admits(self, use_capture: bool) -> bool {
        match self {
            Self::Capture => use_capture,
            Self::Target => true,
            Self::Bubble => !use_capture,
        }
    }
}

/// One node visit in a responder sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// Phase of this visit.
    pub phase: Phase,
    /// Node being visited.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// Capture-phase visit of `node`.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// Target-phase visit of `node`.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// Bubble-phase visit of `node`.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Propagation decision reported after a listener or node visit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep going.
    #[default]
    Continue,
    /// Finish the current node's listeners, then stop visiting nodes.
    Stop,
    /// Stop right away, skipping the current node's remaining listeners.
    StopImmediate,
}

impl Outcome {
    /// Returns true unless this is [`Outcome::Continue`].
    pub const fn is_stop(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Parent lookup used to reconstruct root→target paths.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` for roots.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, P: ParentLookup<K> + ?Sized> ParentLookup<K> for &P {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

/// Parent lookup for flat sets of nodes; every node is its own root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_admission_matches_capture_flag() {
        assert!(Phase::Capture.admits(true));
        assert!(!Phase::Capture.admits(false));
        assert!(Phase::Target.admits(true));
        assert!(Phase::Target.admits(false));
        assert!(!Phase::Bubble.admits(true));
        assert!(Phase::Bubble.admits(false));
    }
}

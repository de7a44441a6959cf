// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node creation configs and scene-wide tunables.

use kurbo::{Point, Size};

use crate::error::ConfigError;
use crate::types::{Anchors, NodeFlags, RetentionPolicy};
use crate::value::Properties;

/// Scene-wide tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Retention policy for nodes whose config does not name one.
    pub orphan_policy: RetentionPolicy,
    /// Grace period, in milliseconds, for nodes whose config does not name one.
    pub orphan_grace: u64,
    /// Minimum interval between delivered `mouse_move` and `drag` events per target.
    pub motion_interval: u64,
    /// Minimum interval between hover hit tests.
    pub hover_interval: u64,
    /// Size of the root node.
    pub root_size: Size,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orphan_policy: RetentionPolicy::AutoDestroy,
            orphan_grace: 500,
            motion_interval: 16,
            hover_interval: 8,
            root_size: Size::new(800.0, 600.0),
        }
    }
}

/// Recognised keys of a node creation config, parsed.
///
/// Unknown keys are left to the node type's factory. Absent keys take the
/// defaults below.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeConfig {
    /// `name`; generated from the type name when absent.
    pub name: Option<String>,
    /// `parent`: name of the node to attach to.
    pub parent: Option<String>,
    /// `x`, `y`.
    pub position: Point,
    /// `width`, `height`.
    pub size: Size,
    /// `priority`.
    pub priority: i32,
    /// `tab_priority`.
    pub tab_priority: i32,
    /// `visible`, `enabled`, `clickable`, `tab_enabled`.
    pub flags: NodeFlags,
    /// `anchor_left`, `anchor_top`, `anchor_right`, `anchor_bottom`.
    pub anchors: Anchors,
    /// `orphan_policy`: `"destroy"`, `"grace"` or `"retain"`.
    pub orphan_policy: Option<RetentionPolicy>,
    /// `orphan_grace`, in milliseconds.
    pub orphan_grace: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: None,
            parent: None,
            position: Point::ZERO,
            size: Size::ZERO,
            priority: 0,
            tab_priority: 0,
            flags: NodeFlags::default(),
            anchors: Anchors::default(),
            orphan_policy: None,
            orphan_grace: None,
        }
    }
}

impl NodeConfig {
    /// Parse the recognised keys of `props`.
    pub fn from_properties(props: &Properties) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(name) = props.get_str("name")? {
            if name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "name".into(),
                    reason: "must not be empty".into(),
                });
            }
            config.name = Some(name.to_owned());
        }
        config.parent = props.get_str("parent")?.map(str::to_owned);

        config.position = Point::new(
            props.get_float("x")?.unwrap_or(0.0),
            props.get_float("y")?.unwrap_or(0.0),
        );
        let width = props.get_float("width")?.unwrap_or(0.0);
        let height = props.get_float("height")?.unwrap_or(0.0);
        for (key, v) in [("width", width), ("height", height)] {
            if v.is_nan() || v < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    reason: format!("must be a non-negative number, got {v}"),
                });
            }
        }
        config.size = Size::new(width, height);

        config.priority = int_field(props, "priority")?.unwrap_or(0);
        config.tab_priority = int_field(props, "tab_priority")?.unwrap_or(0);

        for (key, flag) in [
            ("visible", NodeFlags::VISIBLE),
            ("enabled", NodeFlags::ENABLED),
            ("clickable", NodeFlags::CLICKABLE),
            ("tab_enabled", NodeFlags::TAB_ENABLED),
        ] {
            if let Some(on) = props.get_bool(key)? {
                config.flags.set(flag, on);
            }
        }
        for (key, anchor) in [
            ("anchor_left", Anchors::LEFT),
            ("anchor_top", Anchors::TOP),
            ("anchor_right", Anchors::RIGHT),
            ("anchor_bottom", Anchors::BOTTOM),
        ] {
            if let Some(on) = props.get_bool(key)? {
                config.anchors.set(anchor, on);
            }
        }

        config.orphan_policy = props
            .get_str("orphan_policy")?
            .map(str::parse)
            .transpose()?;
        config.orphan_grace = props
            .get_int("orphan_grace")?
            .map(|ms| {
                u64::try_from(ms).map_err(|_| ConfigError::InvalidValue {
                    key: "orphan_grace".into(),
                    reason: format!("must not be negative, got {ms}"),
                })
            })
            .transpose()?;

        Ok(config)
    }
}

fn int_field(props: &Properties, key: &str) -> Result<Option<i32>, ConfigError> {
    props
        .get_int(key)?
        .map(|v| {
            i32::try_from(v).map_err(|_| ConfigError::InvalidValue {
                key: key.to_owned(),
                reason: format!("{v} does not fit in 32 bits"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = NodeConfig::from_properties(&Properties::new()).unwrap();
        assert_eq!(config, NodeConfig::default());
        assert_eq!(config.anchors, Anchors::LEFT | Anchors::TOP);
    }

    #[test]
    fn recognised_keys_are_parsed_and_unknown_ignored() {
        let props = Properties::new()
            .with("name", "panel")
            .with("x", 5)
            .with("y", 7.5)
            .with("width", 100)
            .with("height", 50)
            .with("priority", 3)
            .with("tab_enabled", true)
            .with("clickable", false)
            .with("anchor_right", true)
            .with("orphan_policy", "grace")
            .with("orphan_grace", 250)
            .with("label", "ignored");
        let config = NodeConfig::from_properties(&props).unwrap();
        assert_eq!(config.name.as_deref(), Some("panel"));
        assert_eq!(config.position, Point::new(5.0, 7.5));
        assert_eq!(config.size, Size::new(100.0, 50.0));
        assert_eq!(config.priority, 3);
        assert!(config.flags.contains(NodeFlags::TAB_ENABLED));
        assert!(!config.flags.contains(NodeFlags::CLICKABLE));
        assert_eq!(config.anchors, Anchors::LEFT | Anchors::TOP | Anchors::RIGHT);
        assert_eq!(config.orphan_policy, Some(RetentionPolicy::Grace));
        assert_eq!(config.orphan_grace, Some(250));
    }

    #[test]
    fn wrong_kinds_and_ranges_are_rejected() {
        let bad_kind = Properties::new().with("priority", "high");
        assert!(matches!(
            NodeConfig::from_properties(&bad_kind),
            Err(ConfigError::InvalidField { key, .. }) if key == "priority"
        ));

        let too_big = Properties::new().with("priority", i64::MAX);
        assert!(matches!(
            NodeConfig::from_properties(&too_big),
            Err(ConfigError::InvalidValue { key, .. }) if key == "priority"
        ));

        let negative_grace = Properties::new().with("orphan_grace", -1);
        assert!(NodeConfig::from_properties(&negative_grace).is_err());

        let negative_size = Properties::new().with("width", -4.0);
        assert!(NodeConfig::from_properties(&negative_size).is_err());

        let empty_name = Properties::new().with("name", "");
        assert!(NodeConfig::from_properties(&empty_name).is_err());

        let bad_policy = Properties::new().with("orphan_policy", "sometimes");
        assert!(NodeConfig::from_properties(&bad_policy).is_err());
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage record and its read-only accessors.

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::behavior::Behavior;
use crate::config::NodeConfig;
use crate::types::{Anchors, NodeFlags, NodeId, RetentionPolicy};

/// A node of the scene.
///
/// Nodes are owned by their [`Scene`](crate::Scene) and are only mutated
/// through it; this type exposes read access.
pub struct Node {
    pub(crate) generation: u32,
    pub(crate) name: String,
    pub(crate) type_name: String,
    pub(crate) parent: Option<NodeId>,
    /// Ascending priority; ties in insertion order.
    pub(crate) children: Vec<NodeId>,
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) anchors: Anchors,
    pub(crate) flags: NodeFlags,
    pub(crate) dirty: bool,
    pub(crate) priority: i32,
    pub(crate) tab_priority: i32,
    pub(crate) retention: RetentionPolicy,
    pub(crate) orphan_grace: u64,
    pub(crate) orphaned_at: Option<u64>,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

impl Node {
    pub(crate) fn new(
        generation: u32,
        name: String,
        type_name: String,
        config: &NodeConfig,
        retention: RetentionPolicy,
        orphan_grace: u64,
        behavior: Box<dyn Behavior>,
    ) -> Self {
        Self {
            generation,
            name,
            type_name,
            parent: None,
            children: Vec::new(),
            position: config.position,
            size: config.size,
            anchors: config.anchors,
            flags: config.flags,
            dirty: true,
            priority: config.priority,
            tab_priority: config.tab_priority,
            retention,
            orphan_grace,
            orphaned_at: None,
            behavior: Some(behavior),
        }
    }

    /// Unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type the node was created as.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Parent, or `None` for the root and for orphans.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in ascending priority order (the last one is on top).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Position relative to the parent.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rectangle in parent coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Anchors used when the parent is resized.
    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    /// State flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether the node is rendered.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Whether the node reacts to input.
    pub fn is_enabled(&self) -> bool {
        self.flags.contains(NodeFlags::ENABLED)
    }

    /// Whether the node is hit tested.
    pub fn is_clickable(&self) -> bool {
        self.flags.contains(NodeFlags::CLICKABLE)
    }

    /// Whether the node takes part in tab traversal.
    pub fn is_tab_enabled(&self) -> bool {
        self.flags.contains(NodeFlags::TAB_ENABLED)
    }

    /// Whether the node changed since it was last rendered.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Z-order among siblings; higher is on top.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Tab order; lower comes first.
    pub fn tab_priority(&self) -> i32 {
        self.tab_priority
    }

    /// What happens to the node once it is detached.
    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Grace period in milliseconds, used with [`RetentionPolicy::Grace`].
    pub fn orphan_grace(&self) -> u64 {
        self.orphan_grace
    }

    /// When the node was detached under a grace policy.
    pub fn orphaned_at(&self) -> Option<u64> {
        self.orphaned_at
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("flags", &self.flags)
            .field("priority", &self.priority)
            .field("tab_priority", &self.tab_priority)
            .field("retention", &self.retention)
            .field("orphaned_at", &self.orphaned_at)
            .finish_non_exhaustive()
    }
}

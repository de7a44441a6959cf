// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree structure, z-order, geometry and flags.

use core::fmt::Write as _;

use kurbo::{Point, Rect, Size, Vec2};

use crate::deferred::Command;
use crate::error::SceneError;
use crate::handle::AsNode;
use crate::node::Node;
use crate::scene::Scene;
use crate::types::{Anchors, NodeFlags, NodeId, RetentionPolicy};

use trellis_event_types::builtin;

impl Scene {
    /// Attach `child` under `parent`, detaching it from its current parent.
    ///
    /// Rejects attaching the root, attaching a node under itself or one of its
    /// descendants, and attaching a node to the parent it already has. The
    /// parent's children are re-sorted by priority afterwards.
    ///
    /// During a walk the checks run right away but the change is applied when
    /// the walk completes.
    pub fn add_child(&mut self, parent: impl AsNode, child: impl AsNode) -> Result<(), SceneError> {
        let parent = self.require(parent)?;
        let child = self.require(child)?;
        if child == self.root() {
            return Err(SceneError::RootNode("reparented"));
        }
        if self.parent(child) == Some(parent) {
            return Err(SceneError::AlreadyChild {
                parent: self.describe(parent),
                child: self.describe(child),
            });
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(SceneError::Cycle {
                parent: self.describe(parent),
                child: self.describe(child),
            });
        }
        if self.is_traversing() {
            log::debug!(
                "deferring attach of `{}` under `{}` until the walk completes",
                self.describe(child),
                self.describe(parent)
            );
            self.defer(Command::AddChild { parent, child });
            return Ok(());
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Detach `child` from `parent`, then apply the child's retention policy.
    ///
    /// An auto-destroy child is destroyed right away (or when the current walk
    /// completes), a grace child is stamped with the current time and a retain
    /// child is left alone.
    pub fn remove_child(&mut self, parent: impl AsNode, child: impl AsNode) -> Result<(), SceneError> {
        let parent = self.require(parent)?;
        let child = self.require(child)?;
        if self.parent(child) != Some(parent) {
            return Err(SceneError::NotAChild {
                parent: self.describe(parent),
                child: self.describe(child),
            });
        }
        if self.is_traversing() {
            log::debug!(
                "deferring detach of `{}` from `{}` until the walk completes",
                self.describe(child),
                self.describe(parent)
            );
            self.defer(Command::RemoveChild { parent, child });
            return Ok(());
        }
        self.detach(parent, child);
        Ok(())
    }

    /// Detach a node from whatever parent it has. A node without a parent is
    /// left as is.
    pub fn remove_from_parent(&mut self, node: impl AsNode) -> Result<(), SceneError> {
        let id = self.require(node)?;
        if id == self.root() {
            return Err(SceneError::RootNode("detached"));
        }
        match self.parent(id) {
            Some(parent) => self.remove_child(parent, id),
            None => Ok(()),
        }
    }

    /// Whether `child` is a direct child of `parent`.
    pub fn has_child(&self, parent: impl AsNode, child: impl AsNode) -> bool {
        match (parent.resolve_in(self), child.resolve_in(self)) {
            (Some(p), Some(c)) => self.parent(c) == Some(p),
            _ => false,
        }
    }

    /// Parent of a node.
    pub fn parent(&self, node: impl AsNode) -> Option<NodeId> {
        self.get(node)?.parent
    }

    /// Children of a node in ascending priority. Empty for stale references.
    pub fn children(&self, node: impl AsNode) -> &[NodeId] {
        self.get(node).map(Node::children).unwrap_or_default()
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor_of(&self, ancestor: impl AsNode, node: impl AsNode) -> bool {
        let (Some(ancestor), Some(node)) = (ancestor.resolve_in(self), node.resolve_in(self)) else {
            return false;
        };
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Whether `node` is a strict descendant of `ancestor`.
    pub fn is_descendant_of(&self, node: impl AsNode, ancestor: impl AsNode) -> bool {
        self.is_ancestor_of(ancestor, node)
    }

    /// Priorities of a node's children, in child order (ascending).
    pub fn get_children_priorities(&self, node: impl AsNode) -> Vec<i32> {
        self.children(node)
            .iter()
            .filter_map(|&c| self.node(c).map(Node::priority))
            .collect()
    }

    /// Set a node's priority and re-sort its siblings.
    ///
    /// The sort is stable: siblings with equal priority keep their order.
    pub fn set_priority(&mut self, node: impl AsNode, priority: i32) -> Result<(), SceneError> {
        let id = self.update_node(node, |n| n.priority = priority)?;
        if let Some(parent) = self.parent(id) {
            self.sort_children(parent);
        }
        Ok(())
    }

    /// Raise a node above all of its siblings.
    ///
    /// The priority only changes when some sibling is at or above it. Fails
    /// with [`SceneError::PriorityOverflow`] when a sibling already holds
    /// `i32::MAX`.
    pub fn move_to_top(&mut self, node: impl AsNode) -> Result<(), SceneError> {
        let id = self.require(node)?;
        let max = self.siblings(id).filter_map(|s| self.node(s)).map(Node::priority).max();
        match (max, self.node(id).map(Node::priority)) {
            (Some(max), Some(own)) if own <= max => {
                let priority = max
                    .checked_add(1)
                    .ok_or_else(|| SceneError::PriorityOverflow(self.describe(id)))?;
                self.set_priority(id, priority)
            }
            _ => Ok(()),
        }
    }

    /// Lower a node below all of its siblings.
    ///
    /// Fails with [`SceneError::PriorityOverflow`] when a sibling already
    /// holds `i32::MIN`.
    pub fn move_to_bottom(&mut self, node: impl AsNode) -> Result<(), SceneError> {
        let id = self.require(node)?;
        let min = self.siblings(id).filter_map(|s| self.node(s)).map(Node::priority).min();
        match (min, self.node(id).map(Node::priority)) {
            (Some(min), Some(own)) if own >= min => {
                let priority = min
                    .checked_sub(1)
                    .ok_or_else(|| SceneError::PriorityOverflow(self.describe(id)))?;
                self.set_priority(id, priority)
            }
            _ => Ok(()),
        }
    }

    /// Move a node and each of its ancestors to the top of their siblings.
    pub fn bring_to_front(&mut self, node: impl AsNode) -> Result<(), SceneError> {
        let mut cur = Some(self.require(node)?);
        while let Some(id) = cur {
            self.move_to_top(id)?;
            cur = self.parent(id);
        }
        Ok(())
    }

    /// Move a node and each of its ancestors to the bottom of their siblings.
    pub fn send_to_back(&mut self, node: impl AsNode) -> Result<(), SceneError> {
        let mut cur = Some(self.require(node)?);
        while let Some(id) = cur {
            self.move_to_bottom(id)?;
            cur = self.parent(id);
        }
        Ok(())
    }

    /// Move a node within its parent.
    pub fn set_position(&mut self, node: impl AsNode, position: Point) -> Result<(), SceneError> {
        self.update_node(node, |n| n.position = position).map(drop)
    }

    /// Resize a node and re-lay-out its children according to their anchors.
    pub fn set_size(&mut self, node: impl AsNode, size: Size) -> Result<(), SceneError> {
        let id = self.require(node)?;
        self.resize(id, size);
        Ok(())
    }

    /// Set the edges a node follows when its parent is resized.
    pub fn set_anchors(&mut self, node: impl AsNode, anchors: Anchors) -> Result<(), SceneError> {
        self.update_node(node, |n| n.anchors = anchors).map(drop)
    }

    /// Show or hide a node. A change queues `shown` or `hidden` at the node.
    pub fn set_visible(&mut self, node: impl AsNode, visible: bool) -> Result<(), SceneError> {
        let name = if visible { builtin::SHOWN } else { builtin::HIDDEN };
        self.set_flag(node, NodeFlags::VISIBLE, visible, Some(name))
    }

    /// Enable or disable a node. A change queues `enabled` or `disabled` at the
    /// node; a disabled node also loses keyboard focus.
    pub fn set_enabled(&mut self, node: impl AsNode, enabled: bool) -> Result<(), SceneError> {
        let name = if enabled { builtin::ENABLED } else { builtin::DISABLED };
        self.set_flag(node, NodeFlags::ENABLED, enabled, Some(name))?;
        self.prune_slots();
        Ok(())
    }

    /// Include or exclude a node from pointer hit testing.
    pub fn set_clickable(&mut self, node: impl AsNode, clickable: bool) -> Result<(), SceneError> {
        self.set_flag(node, NodeFlags::CLICKABLE, clickable, None)
    }

    /// Include or exclude a node from tab traversal.
    pub fn set_tab_enabled(&mut self, node: impl AsNode, tab_enabled: bool) -> Result<(), SceneError> {
        self.set_flag(node, NodeFlags::TAB_ENABLED, tab_enabled, None)
    }

    /// Set a node's place in tab order; lower comes first.
    pub fn set_tab_priority(&mut self, node: impl AsNode, tab_priority: i32) -> Result<(), SceneError> {
        self.update_node(node, |n| n.tab_priority = tab_priority).map(drop)
    }

    /// A node's rectangle in root coordinates.
    ///
    /// For an orphan the coordinates are relative to the top of its detached
    /// subtree.
    pub fn world_rect(&self, node: impl AsNode) -> Option<Rect> {
        let id = node.resolve_in(self)?;
        let rect = self.node(id)?.rect();
        let mut offset = Vec2::ZERO;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            let n = self.node(p)?;
            offset += n.position.to_vec2();
            cur = n.parent;
        }
        Some(rect + offset)
    }

    /// Pre-order walk of the subtree at `node`, children in ascending priority.
    pub fn depth_first(&self, node: impl AsNode) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(start) = node.resolve_in(self) else {
            return out;
        };
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(n) = self.node(id) else {
                continue;
            };
            out.push(id);
            stack.extend(n.children.iter().rev().copied());
        }
        out
    }

    /// Text dump of the tree followed by any orphans, for debugging.
    ///
    /// The format is not stable.
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        self.print_subtree(&mut out, self.root(), 0);
        let orphans = self.orphans();
        if !orphans.is_empty() {
            out.push_str("orphans:\n");
            for orphan in orphans {
                self.print_subtree(&mut out, orphan, 1);
            }
        }
        out
    }

    // --- internals ---

    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.parent(child) {
            self.unlink(old, child);
        }
        let Some(c) = self.node_mut(child) else {
            return;
        };
        c.parent = Some(parent);
        c.orphaned_at = None;
        c.dirty = true;
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
            p.dirty = true;
        }
        self.sort_children(parent);
        log::trace!("attached `{}` under `{}`", self.describe(child), self.describe(parent));
        // Attaching under a detached subtree detaches the slot holders with it.
        self.prune_slots();
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        self.unlink(parent, child);
        let now = self.now();
        let retention = match self.node_mut(child) {
            Some(c) => {
                if c.retention == RetentionPolicy::Grace {
                    c.orphaned_at = Some(now);
                }
                c.retention
            }
            None => return,
        };
        log::debug!("detached `{}` ({retention})", self.describe(child));
        if retention == RetentionPolicy::AutoDestroy {
            self.destroy_now(child);
        }
        self.prune_slots();
    }

    /// Remove `child` from `parent`'s list and clear its parent link.
    pub(crate) fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != child);
            p.dirty = true;
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
    }

    fn sort_children(&mut self, parent: NodeId) {
        let Some(mut children) = self.node_mut(parent).map(|p| core::mem::take(&mut p.children)) else {
            return;
        };
        children.sort_by_key(|&c| self.node(c).map_or(i32::MIN, Node::priority));
        if let Some(p) = self.node_mut(parent) {
            p.children = children;
            p.dirty = true;
        }
    }

    fn siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let parent = self.parent(id);
        parent
            .map(|p| self.children(p))
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(move |&s| s != id)
    }

    /// Apply `f` to a node and mark it dirty.
    fn update_node(&mut self, node: impl AsNode, f: impl FnOnce(&mut Node)) -> Result<NodeId, SceneError> {
        let id = self.require(node)?;
        let n = self.node_mut(id).ok_or(SceneError::StaleHandle)?;
        f(n);
        n.dirty = true;
        Ok(id)
    }

    fn set_flag(
        &mut self,
        node: impl AsNode,
        flag: NodeFlags,
        on: bool,
        notify: Option<&str>,
    ) -> Result<(), SceneError> {
        let id = self.require(node)?;
        let n = self.node_mut(id).ok_or(SceneError::StaleHandle)?;
        if n.flags.contains(flag) == on {
            return Ok(());
        }
        n.flags.set(flag, on);
        n.dirty = true;
        if let Some(name) = notify {
            self.queue_builtin(name, id);
        }
        Ok(())
    }

    fn resize(&mut self, id: NodeId, size: Size) {
        let Some(n) = self.node_mut(id) else {
            return;
        };
        let delta = size - n.size;
        if delta == Size::ZERO {
            return;
        }
        n.size = size;
        n.dirty = true;
        let children = n.children.clone();
        for child in children {
            let Some(c) = self.node_mut(child) else {
                continue;
            };
            let anchors = c.anchors;
            let (x, w) = relayout_axis(
                c.position.x,
                c.size.width,
                anchors.contains(Anchors::LEFT),
                anchors.contains(Anchors::RIGHT),
                delta.width,
            );
            let (y, h) = relayout_axis(
                c.position.y,
                c.size.height,
                anchors.contains(Anchors::TOP),
                anchors.contains(Anchors::BOTTOM),
                delta.height,
            );
            if c.position != Point::new(x, y) {
                c.position = Point::new(x, y);
                c.dirty = true;
            }
            self.resize(child, Size::new(w, h));
        }
    }

    fn print_subtree(&self, out: &mut String, id: NodeId, level: usize) {
        let Some(n) = self.node(id) else {
            return;
        };
        let flags = n
            .flags
            .iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(
            out,
            "{:indent$}{} ({}) @({}, {}) {}x{} priority={} [{}]",
            "",
            n.name,
            n.type_name,
            n.position.x,
            n.position.y,
            n.size.width,
            n.size.height,
            n.priority,
            flags,
            indent = level * 2,
        );
        for &child in &n.children {
            self.print_subtree(out, child, level + 1);
        }
    }
}

/// New `(position, length)` along one axis after the parent grew by `delta`.
fn relayout_axis(pos: f64, len: f64, near: bool, far: bool, delta: f64) -> (f64, f64) {
    match (near, far) {
        (true, true) => (pos, (len + delta).max(0.0)),
        (false, true) => (pos + delta, len),
        (true, false) => (pos, len),
        (false, false) => (pos + delta / 2.0, len),
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus, mouse hover and tab order.
//!
//! The scene has one keyboard focus slot and one hover slot. Changing either
//! updates the slot first and then dispatches, synchronously, a leave-style
//! notification to the previous holder followed by an enter-style one to the
//! new holder. Each notification's [`related`](crate::Event::related) node is
//! the other party.
//!
//! A holder that is destroyed or detached (or, for focus, disabled) loses its
//! slot silently.

use trellis_event_types::builtin;
use trellis_focus::{DefaultPolicy, FocusEntry, FocusPolicy, FocusSpace, Navigation};

use crate::error::SceneError;
use crate::handle::{AsNode, Handle};
use crate::scene::Scene;
use crate::types::NodeId;

impl Scene {
    /// Give keyboard focus to a node.
    ///
    /// Returns `Ok(false)` without changing anything when the node is disabled
    /// or not attached. Focusing the current holder again is a no-op.
    pub fn set_keyboard_focus(&mut self, node: impl AsNode) -> Result<bool, SceneError> {
        let id = self.require(node)?;
        if !self.can_focus(id) {
            return Ok(false);
        }
        if self.focused == Some(id) {
            return Ok(true);
        }
        let old = self.focused.replace(id);
        log::debug!("keyboard focus -> `{}`", self.describe(id));
        if let Some(old) = old {
            self.dispatch_builtin(builtin::FOCUS_LOST, old, Some(id));
        }
        self.dispatch_builtin(builtin::FOCUS_GAINED, id, old);
        Ok(true)
    }

    /// Take keyboard focus away from its holder, if any.
    pub fn clear_keyboard_focus(&mut self) -> Option<NodeId> {
        let old = self.focused.take()?;
        self.dispatch_builtin(builtin::FOCUS_LOST, old, None);
        Some(old)
    }

    /// The node holding keyboard focus.
    pub fn keyboard_focus(&self) -> Option<NodeId> {
        self.focused.filter(|&id| self.can_focus(id))
    }

    /// A handle to the node holding keyboard focus.
    pub fn keyboard_focused_handle(&self) -> Option<Handle> {
        self.handle_of(self.keyboard_focus()?)
    }

    /// Mark a node as hovered by the mouse.
    ///
    /// Returns `Ok(false)` without changing anything when the node is not
    /// attached.
    pub fn set_mouse_hovered(&mut self, node: impl AsNode) -> Result<bool, SceneError> {
        let id = self.require(node)?;
        if !self.is_attached(id) {
            return Ok(false);
        }
        self.hover(Some(id));
        Ok(true)
    }

    /// Clear the hover slot.
    pub fn clear_mouse_hovered(&mut self) -> Option<NodeId> {
        let old = self.hovered?;
        self.hover(None);
        Some(old)
    }

    /// The node under the mouse.
    pub fn mouse_hovered(&self) -> Option<NodeId> {
        self.hovered.filter(|&id| self.is_attached(id))
    }

    /// Nodes that take part in tab traversal, in tab order.
    ///
    /// These are the attached, enabled, tab-enabled nodes ordered by ascending
    /// tab priority, then ascending priority, then tree order.
    pub fn tab_order(&self) -> Vec<NodeId> {
        trellis_focus::tab_order(&FocusSpace {
            nodes: &self.focus_entries(),
        })
    }

    /// Move keyboard focus to the next node in tab order, wrapping at the end.
    ///
    /// Without a current holder, focus goes to the first node.
    pub fn do_tab_forward(&mut self) -> Option<NodeId> {
        self.tab(Navigation::Next)
    }

    /// Move keyboard focus to the previous node in tab order, wrapping at the start.
    pub fn do_tab_reverse(&mut self) -> Option<NodeId> {
        self.tab(Navigation::Prev)
    }

    // --- internals ---

    fn can_focus(&self, id: NodeId) -> bool {
        self.is_attached(id) && self.node(id).is_some_and(|n| n.is_enabled())
    }

    fn tab(&mut self, direction: Navigation) -> Option<NodeId> {
        let entries = self.focus_entries();
        let next = DefaultPolicy::default().next(
            self.keyboard_focus(),
            direction,
            &FocusSpace { nodes: &entries },
        )?;
        match self.set_keyboard_focus(next) {
            Ok(true) => Some(next),
            _ => None,
        }
    }

    fn focus_entries(&self) -> Vec<FocusEntry<NodeId>> {
        self.depth_first(self.root())
            .into_iter()
            .filter_map(|id| {
                let n = self.node(id)?;
                n.is_tab_enabled().then(|| FocusEntry {
                    id,
                    order: n.tab_priority(),
                    priority: n.priority(),
                    enabled: n.is_enabled(),
                })
            })
            .collect()
    }

    pub(crate) fn hover(&mut self, target: Option<NodeId>) {
        if self.hovered == target {
            return;
        }
        let old = core::mem::replace(&mut self.hovered, target);
        if let Some(old) = old.filter(|&id| self.is_alive(id)) {
            self.dispatch_builtin(builtin::MOUSE_LEAVE, old, target);
        }
        if let Some(new) = target {
            self.dispatch_builtin(builtin::MOUSE_ENTER, new, old);
        }
    }

    /// Drop slot holders that are gone, detached or (for focus) disabled.
    pub(crate) fn prune_slots(&mut self) {
        if let Some(id) = self.focused
            && !self.can_focus(id)
        {
            log::debug!("keyboard focus dropped from `{}`", self.describe(id));
            self.focused = None;
        }
        if let Some(id) = self.hovered
            && !self.is_attached(id)
        {
            self.hovered = None;
        }
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural changes requested while a walk is in progress.
//!
//! Listeners and behaviors run while the scene is walking a snapshot of the
//! tree. Destroying or re-linking nodes then would invalidate that snapshot,
//! so such requests are queued here and applied, in order, once the outermost
//! walk has finished.

use crate::scene::Scene;
use crate::types::NodeId;

/// A queued structural change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    AddChild { parent: NodeId, child: NodeId },
    RemoveChild { parent: NodeId, child: NodeId },
    Destroy(NodeId),
    CollectGarbage,
}

impl Scene {
    /// Whether a dispatch, update or render walk is running.
    ///
    /// Structural changes made while this is true are applied when the walk
    /// completes.
    pub fn is_traversing(&self) -> bool {
        self.traversal_depth > 0
    }

    pub(crate) fn begin_traversal(&mut self) {
        self.traversal_depth += 1;
    }

    /// Leave a walk; the outermost one flushes pending commands.
    pub(crate) fn end_traversal(&mut self) {
        self.traversal_depth = self.traversal_depth.saturating_sub(1);
        if self.traversal_depth == 0 {
            self.flush_pending();
        }
    }

    pub(crate) fn defer(&mut self, command: Command) {
        log::trace!("deferred {command:?}");
        self.pending.push(command);
    }

    fn flush_pending(&mut self) {
        // Commands applied here may queue more (a destroy running an init, ...);
        // keep draining until nothing is left.
        while !self.pending.is_empty() {
            for command in core::mem::take(&mut self.pending) {
                self.apply(command);
            }
        }
    }

    fn apply(&mut self, command: Command) {
        let result = match command {
            Command::AddChild { parent, child } => self.add_child(parent, child),
            Command::RemoveChild { parent, child } => self.remove_child(parent, child),
            Command::Destroy(id) => {
                // A node may already be gone when an earlier command freed it.
                if self.is_alive(id) {
                    self.destroy_now(id);
                }
                Ok(())
            }
            Command::CollectGarbage => {
                self.collect_garbage();
                Ok(())
            }
        };
        if let Err(err) = result {
            log::warn!("deferred {command:?} failed: {err}");
        }
    }
}

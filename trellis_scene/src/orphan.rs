// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orphan retention and garbage collection.
//!
//! A node without a parent that is not the root is an orphan. What happens to
//! it depends on its [`RetentionPolicy`]:
//!
//! - [`AutoDestroy`](RetentionPolicy::AutoDestroy): destroyed when it is
//!   detached (after the current walk, if one is running).
//! - [`Grace`](RetentionPolicy::Grace): stamped with the detach time and
//!   destroyed by the first sweep at least `orphan_grace` milliseconds later.
//! - [`Retain`](RetentionPolicy::Retain): kept until destroyed explicitly.
//!
//! Nodes that were created without a parent and never attached are orphans
//! too, but carry no stamp and are never swept.

use crate::deferred::Command;
use crate::error::SceneError;
use crate::handle::AsNode;
use crate::scene::Scene;
use crate::types::{NodeId, RetentionPolicy};

impl Scene {
    /// Set a node's retention policy.
    ///
    /// Switching a detached node to a sweepable policy stamps it with the
    /// current time if it has no stamp yet, so its grace period starts now.
    pub fn set_orphan_retention_policy(
        &mut self,
        node: impl AsNode,
        policy: RetentionPolicy,
    ) -> Result<(), SceneError> {
        let id = self.require(node)?;
        if id == self.root() {
            return Err(SceneError::RootNode("given a retention policy"));
        }
        let now = self.now();
        let n = self.node_mut(id).ok_or(SceneError::StaleHandle)?;
        n.retention = policy;
        if n.parent.is_none() {
            n.orphaned_at = match policy {
                RetentionPolicy::Retain => None,
                RetentionPolicy::Grace | RetentionPolicy::AutoDestroy => n.orphaned_at.or(Some(now)),
            };
        }
        Ok(())
    }

    /// A node's retention policy.
    pub fn orphan_retention_policy(&self, node: impl AsNode) -> Option<RetentionPolicy> {
        Some(self.get(node)?.retention())
    }

    /// A node's grace period in milliseconds.
    pub fn orphan_grace(&self, node: impl AsNode) -> Option<u64> {
        Some(self.get(node)?.orphan_grace())
    }

    /// Set a node's grace period in milliseconds.
    pub fn set_orphan_grace(&mut self, node: impl AsNode, grace: u64) -> Result<(), SceneError> {
        let id = self.require(node)?;
        let n = self.node_mut(id).ok_or(SceneError::StaleHandle)?;
        n.orphan_grace = grace;
        Ok(())
    }

    /// Policy given to nodes created from now on whose config names none.
    pub fn set_default_orphan_policy(&mut self, policy: RetentionPolicy) {
        self.config.orphan_policy = policy;
    }

    /// Grace period given to nodes created from now on whose config names none.
    pub fn set_default_orphan_grace(&mut self, grace: u64) {
        self.config.orphan_grace = grace;
    }

    /// Live nodes other than the root that have no parent.
    pub fn orphans(&self) -> Vec<NodeId> {
        let root = self.root();
        self.node_ids()
            .filter(|&id| id != root && self.node(id).is_some_and(|n| n.parent.is_none()))
            .collect()
    }

    /// Number of orphans.
    pub fn count_orphaned_nodes(&self) -> usize {
        self.orphans().len()
    }

    /// Destroy every orphan whose policy says it is due.
    ///
    /// Auto-destroy orphans with a detach stamp are destroyed, grace orphans
    /// once `now - orphaned_at >= orphan_grace`, retain orphans never. The
    /// sweep is a single pass over the orphans present when it starts; during
    /// a walk it is deferred to the end of the walk and returns 0.
    ///
    /// Returns the number of nodes destroyed, descendants included.
    pub fn collect_garbage(&mut self) -> usize {
        if self.is_traversing() {
            if !self.pending.contains(&Command::CollectGarbage) {
                log::debug!("deferring garbage collection until the walk completes");
                self.defer(Command::CollectGarbage);
            }
            return 0;
        }
        let now = self.now();
        let due: Vec<NodeId> = self
            .orphans()
            .into_iter()
            .filter(|&id| {
                self.node(id).is_some_and(|n| match (n.retention, n.orphaned_at) {
                    (RetentionPolicy::AutoDestroy, Some(_)) => true,
                    (RetentionPolicy::Grace, Some(at)) => now.saturating_sub(at) >= n.orphan_grace,
                    _ => false,
                })
            })
            .collect();

        let mut freed = 0;
        for id in due {
            freed += self.destroy_now(id);
        }
        if freed > 0 {
            log::debug!("garbage collection destroyed {freed} node(s)");
        }
        freed
    }
}

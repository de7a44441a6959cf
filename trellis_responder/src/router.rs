// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the root→target path through a [`ParentLookup`] and emits the
//! capture → target → bubble sequence for it.
//!
//! The path is computed when the router is asked for it, so a tree that changed
//! since an event was queued is routed as it is now.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase};

/// Deterministic responder chain router.
///
/// Construct with [`Router::new`] and a [`ParentLookup`] over your tree, then
/// call [`Router::dispatch_for`] for each event target.
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    pub(crate) parent: P,
    pub(crate) _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router over a parent lookup.
    pub fn new(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Root→target path for `target` (inclusive at both ends).
    pub fn path_to(&self, target: K) -> Vec<K> {
        reconstruct_path(target, &self.parent)
    }

    /// Emit a dispatch sequence for `target` by reconstructing its path.
    pub fn dispatch_for(&self, target: K) -> Vec<Dispatch<K>> {
        emit_path(&self.path_to(target))
    }
}

/// Collect `target` and its ancestors, root first.
pub fn reconstruct_path<K: Copy + Eq>(target: K, parent_lookup: &impl ParentLookup<K>) -> Vec<K> {
    let mut out = Vec::new();
    let mut cur = target;
    // Collect to root; caller ensures acyclic ancestry.
    loop {
        out.push(cur);
        match parent_lookup.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

/// Emit capture → target → bubble entries for a root→target `path`.
///
/// The last element is the target. An empty path yields an empty sequence.
pub fn emit_path<K: Copy>(path: &[K]) -> Vec<Dispatch<K>> {
    let mut out = Vec::with_capacity(path.len() * 2);
    let (target, ancestors) = match path.split_last() {
        Some((t, ancestors)) => (t, ancestors),
        None => return out,
    };

    // Capture: root→(excluding target)
    for &n in ancestors {
        out.push(Dispatch {
            phase: Phase::Capture,
            node: n,
        });
    }

    // Target: only the target element
    out.push(Dispatch::target(*target));

    // Bubble: parent→root (excluding target)
    for &n in ancestors.iter().rev() {
        out.push(Dispatch::bubble(n));
    }
    out
}

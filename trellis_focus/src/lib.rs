// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Focus: keyboard focus traversal primitives.
//!
//! This crate models tab traversal as a combination of:
//! - **Navigation intents** ([`Navigation`]): [`Navigation::Next`] (Tab) and
//!   [`Navigation::Prev`] (Shift+Tab).
//! - A **view of candidates** ([`FocusEntry`] / [`FocusSpace`]) listing focusable nodes
//!   in document order together with their explicit tab order and stacking priority.
//! - Pluggable **policies** ([`FocusPolicy`]) that select the next focused node given an
//!   origin, a direction, and a read-only view of the candidates.
//!
//! ## Ordering
//!
//! [`DefaultPolicy`] orders enabled entries by ascending [`FocusEntry::order`], then
//! ascending [`FocusEntry::priority`], then their position in the space (document order).
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_focus::{DefaultPolicy, FocusEntry, FocusPolicy, FocusSpace, Navigation, WrapMode};
//!
//! let entries = vec![
//!     FocusEntry { id: 1_u32, order: 2, priority: 0, enabled: true },
//!     FocusEntry { id: 2_u32, order: 1, priority: 0, enabled: false },
//!     FocusEntry { id: 3_u32, order: 3, priority: 0, enabled: true },
//! ];
//! let space = FocusSpace { nodes: &entries };
//! let policy = DefaultPolicy { wrap: WrapMode::Wrap };
//!
//! // From "before first", Tab lands on the lowest order among enabled entries…
//! assert_eq!(policy.next(None, Navigation::Next, &space), Some(1));
//! assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
//! // …and wraps after the last.
//! assert_eq!(policy.next(Some(3), Navigation::Next, &space), Some(1));
//! ```
//!
//! The core types are generic over the node identifier `K`, so callers can use any small,
//! copyable handle.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

/// Direction of focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate in forward order (Tab).
    Next,
    /// Move to the previous candidate in forward order (Shift+Tab).
    Prev,
}

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this focusable node.
    pub id: K,
    /// Explicit tab order; lower comes first.
    pub order: i32,
    /// Stacking priority, used to break ties in `order`; lower comes first.
    pub priority: i32,
    /// Whether this node can currently take focus.
    ///
    /// Disabled entries are skipped by traversal.
    pub enabled: bool,
}

/// A read-only view of focusable candidates in document order.
///
/// A `FocusSpace` is typically built by walking a scene depth-first. Policies should
/// treat it as an immutable snapshot.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Focusable candidates, in document order.
    pub nodes: &'a [FocusEntry<K>],
}

/// Wrap mode configuration for focus traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Do not wrap; reaching the end of the sequence yields no next candidate.
    Never,
    /// Wrap from the last candidate to the first and vice versa.
    Wrap,
}

/// Trait for focus traversal policies.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target.
    ///
    /// `origin` is the currently focused node, or `None` for "before first".
    fn next(&self, origin: Option<K>, direction: Navigation, space: &FocusSpace<'_, K>) -> Option<K>;
}

/// Linear tab-order policy.
#[derive(Copy, Clone, Debug)]
pub struct DefaultPolicy {
    /// Wrap behavior when traversing focusable candidates.
    pub wrap: WrapMode,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Wrap,
        }
    }
}

impl<K> FocusPolicy<K> for DefaultPolicy
where
    K: Copy + Eq,
{
    fn next(&self, origin: Option<K>, direction: Navigation, space: &FocusSpace<'_, K>) -> Option<K> {
        let step = match direction {
            Navigation::Next => Step::Forward,
            Navigation::Prev => Step::Backward,
        };
        next_linear(origin, space, self.wrap, step)
    }
}

/// Enabled candidates of `space` in traversal order.
pub fn tab_order<K: Copy>(space: &FocusSpace<'_, K>) -> Vec<K> {
    sorted_indices(space)
        .into_iter()
        .map(|i| space.nodes[i].id)
        .collect()
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

fn sorted_indices<K>(space: &FocusSpace<'_, K>) -> Vec<usize> {
    let nodes = space.nodes;
    let mut indices: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.enabled.then_some(i))
        .collect();
    // Stable sort: document order breaks remaining ties.
    indices.sort_by(|&ia, &ib| compare_linear(&nodes[ia], &nodes[ib]));
    indices
}

fn next_linear<K>(origin: Option<K>, space: &FocusSpace<'_, K>, wrap: WrapMode, step: Step) -> Option<K>
where
    K: Copy + Eq,
{
    let nodes = space.nodes;
    let indices = sorted_indices(space);
    let first = *indices.first()?;
    let last = *indices.last()?;

    // Locate the origin within the sorted candidates, if present.
    let origin_pos = origin.and_then(|o| indices.iter().position(|&i| nodes[i].id == o));

    match step {
        Step::Forward => match origin_pos {
            Some(pos) => {
                if let Some(&i) = indices.get(pos + 1) {
                    Some(nodes[i].id)
                } else if wrap == WrapMode::Wrap {
                    Some(nodes[first].id)
                } else {
                    None
                }
            }
            None => Some(nodes[first].id),
        },
        Step::Backward => match origin_pos {
            Some(pos) => {
                if pos > 0 {
                    Some(nodes[indices[pos - 1]].id)
                } else if wrap == WrapMode::Wrap {
                    Some(nodes[last].id)
                } else {
                    None
                }
            }
            None => Some(nodes[last].id),
        },
    }
}

fn compare_linear<K>(a: &FocusEntry<K>, b: &FocusEntry<K>) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| a.priority.cmp(&b.priority))
}

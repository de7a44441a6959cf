// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener storage keyed by node and event type.
//!
//! ## Ordering
//!
//! [`ListenerTable::select`] returns listener ids in invocation order: descending
//! [`ListenerOptions::priority`], ties in registration order.
//!
//! ## Reentrancy
//!
//! Callbacks are stored by value. A dispatcher that needs to hand the owning
//! context to a callback can [`take`](ListenerTable::take) it out, invoke it, and
//! [`restore`](ListenerTable::restore) it afterwards. A listener removed while
//! taken is simply dropped on restore, and a taken listener is skipped by nested
//! dispatches because `take` returns `None` for it.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::Phase;

/// Identifier of a registered listener, unique within its table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Registration options of a listener.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Run during the capture phase instead of the bubble phase.
    ///
    /// At the target both kinds run.
    pub use_capture: bool,
    /// Invocation order among listeners of the same node and phase; higher first.
    pub priority: i32,
    /// Remove the listener after its first invocation.
    pub once: bool,
}

impl ListenerOptions {
    /// Options for a capture-phase listener.
    pub fn capture() -> Self {
        Self {
            use_capture: true,
            ..Self::default()
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Mark as a one-shot listener.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

struct Entry<T, C> {
    id: ListenerId,
    event_type: T,
    options: ListenerOptions,
    callback: Option<C>,
}

/// Listener table keyed by node.
pub struct ListenerTable<K, T, C> {
    by_node: HashMap<K, Vec<Entry<T, C>>>,
    owners: HashMap<ListenerId, K>,
    next_id: u64,
}

impl<K, T, C> core::fmt::Debug for ListenerTable<K, T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerTable")
            .field("nodes", &self.by_node.len())
            .field("listeners", &self.owners.len())
            .finish_non_exhaustive()
    }
}

impl<K, T, C> Default for ListenerTable<K, T, C> {
    fn default() -> Self {
        Self {
            by_node: HashMap::new(),
            owners: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<K, T, C> ListenerTable<K, T, C>
where
    K: Copy + Eq + Hash,
    T: Copy + Eq,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `event_type` on `node`.
    pub fn add(&mut self, node: K, event_type: T, options: ListenerOptions, callback: C) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_node.entry(node).or_default().push(Entry {
            id,
            event_type,
            options,
            callback: Some(callback),
        });
        self.owners.insert(id, node);
        id
    }

    /// Remove a listener by id. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(node) = self.owners.remove(&id) else {
            return false;
        };
        if let Some(entries) = self.by_node.get_mut(&node) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                self.by_node.remove(&node);
            }
        }
        true
    }

    /// Remove all listeners for `event_type` on `node`, optionally restricted to
    /// one value of `use_capture`. Returns how many were removed.
    pub fn remove_matching(&mut self, node: &K, event_type: &T, use_capture: Option<bool>) -> usize {
        let Some(entries) = self.by_node.get_mut(node) else {
            return 0;
        };
        let before = entries.len();
        let owners = &mut self.owners;
        entries.retain(|e| {
            let hit = e.event_type == *event_type
                && use_capture.is_none_or(|c| e.options.use_capture == c);
            if hit {
                owners.remove(&e.id);
            }
            !hit
        });
        let removed = before - entries.len();
        if entries.is_empty() {
            self.by_node.remove(node);
        }
        removed
    }

    /// Remove every listener registered on `node`.
    pub fn remove_node(&mut self, node: &K) -> usize {
        let Some(entries) = self.by_node.remove(node) else {
            return 0;
        };
        for e in &entries {
            self.owners.remove(&e.id);
        }
        entries.len()
    }

    /// Whether `node` has a listener for `event_type`, optionally restricted to
    /// one value of `use_capture`.
    pub fn contains(&self, node: &K, event_type: &T, use_capture: Option<bool>) -> bool {
        self.by_node.get(node).is_some_and(|entries| {
            entries.iter().any(|e| {
                e.event_type == *event_type
                    && use_capture.is_none_or(|c| e.options.use_capture == c)
            })
        })
    }

    /// Whether `id` is still registered.
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.owners.contains_key(&id)
    }

    /// Node that owns `id`.
    pub fn owner(&self, id: ListenerId) -> Option<K> {
        self.owners.get(&id).copied()
    }

    /// Options `id` was registered with.
    pub fn options(&self, id: ListenerId) -> Option<ListenerOptions> {
        self.entry(id).map(|e| e.options)
    }

    /// Listener ids for `node`/`event_type` that run in `phase`, in invocation order.
    pub fn select(&self, node: &K, event_type: &T, phase: Phase) -> SmallVec<[ListenerId; 4]> {
        let mut picked: SmallVec<[(i32, ListenerId); 4]> = SmallVec::new();
        if let Some(entries) = self.by_node.get(node) {
            for e in entries {
                if e.event_type == *event_type && phase.admits(e.options.use_capture) {
                    picked.push((e.options.priority, e.id));
                }
            }
        }
        // Stable: equal priorities keep registration order.
        picked.sort_by(|a, b| b.0.cmp(&a.0));
        picked.into_iter().map(|(_, id)| id).collect()
    }

    /// Move the callback of `id` out of the table.
    ///
    /// Returns `None` if the listener is unknown or its callback is already taken.
    pub fn take(&mut self, id: ListenerId) -> Option<C> {
        self.entry_mut(id)?.callback.take()
    }

    /// Put a taken callback back. Returns false (dropping it) if the listener was
    /// removed in the meantime.
    pub fn restore(&mut self, id: ListenerId, callback: C) -> bool {
        match self.entry_mut(id) {
            Some(e) if e.callback.is_none() => {
                e.callback = Some(callback);
                true
            }
            _ => false,
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns true if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    fn entry(&self, id: ListenerId) -> Option<&Entry<T, C>> {
        let node = self.owners.get(&id)?;
        self.by_node.get(node)?.iter().find(|e| e.id == id)
    }

    fn entry_mut(&mut self, id: ListenerId) -> Option<&mut Entry<T, C>> {
        let node = self.owners.get(&id)?;
        self.by_node.get_mut(node)?.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type Table = ListenerTable<u32, u8, &'static str>;

    fn names(table: &mut Table, ids: &[ListenerId]) -> Vec<&'static str> {
        ids.iter()
            .map(|&id| {
                let cb = table.take(id).unwrap();
                table.restore(id, cb);
                cb
            })
            .collect()
    }

    #[test]
    fn select_orders_by_priority_then_registration() {
        let mut table = Table::new();
        table.add(1, 0, ListenerOptions::default(), "low");
        table.add(1, 0, ListenerOptions::default().with_priority(5), "high-a");
        table.add(1, 0, ListenerOptions::default().with_priority(5), "high-b");
        table.add(1, 0, ListenerOptions::default().with_priority(-1), "lowest");
        let ids = table.select(&1, &0, Phase::Target);
        assert_eq!(names(&mut table, &ids), vec!["high-a", "high-b", "low", "lowest"]);
    }

    #[test]
    fn select_filters_by_phase_and_type() {
        let mut table = Table::new();
        table.add(1, 0, ListenerOptions::capture(), "capture");
        table.add(1, 0, ListenerOptions::default(), "bubble");
        table.add(1, 9, ListenerOptions::default(), "other-type");
        table.add(2, 0, ListenerOptions::default(), "other-node");

        let capture = table.select(&1, &0, Phase::Capture);
        assert_eq!(names(&mut table, &capture), vec!["capture"]);
        let bubble = table.select(&1, &0, Phase::Bubble);
        assert_eq!(names(&mut table, &bubble), vec!["bubble"]);
        let target = table.select(&1, &0, Phase::Target);
        assert_eq!(names(&mut table, &target), vec!["capture", "bubble"]);
    }

    #[test]
    fn remove_by_id_and_by_match() {
        let mut table = Table::new();
        let a = table.add(1, 0, ListenerOptions::capture(), "a");
        table.add(1, 0, ListenerOptions::default(), "b");
        table.add(1, 0, ListenerOptions::default(), "c");
        assert!(table.remove(a));
        assert!(!table.remove(a));
        assert!(!table.contains(&1, &0, Some(true)));
        assert_eq!(table.remove_matching(&1, &0, Some(false)), 2);
        assert!(!table.contains(&1, &0, None));
        assert!(table.is_empty());
    }

    #[test]
    fn remove_node_drops_everything_for_it() {
        let mut table = Table::new();
        table.add(1, 0, ListenerOptions::default(), "a");
        table.add(1, 1, ListenerOptions::default(), "b");
        let keep = table.add(2, 0, ListenerOptions::default(), "c");
        assert_eq!(table.remove_node(&1), 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.owner(keep), Some(2));
    }

    #[test]
    fn take_and_restore_round_trip() {
        let mut table = Table::new();
        let id = table.add(1, 0, ListenerOptions::default(), "a");
        let cb = table.take(id).unwrap();
        // A taken callback cannot be taken twice.
        assert!(table.take(id).is_none());
        assert!(table.restore(id, cb));
        assert_eq!(table.take(id), Some("a"));
    }

    #[test]
    fn restore_after_removal_drops_callback() {
        let mut table = Table::new();
        let id = table.add(1, 0, ListenerOptions::default(), "a");
        let cb = table.take(id).unwrap();
        table.remove(id);
        assert!(!table.restore(id, cb));
        assert!(!table.is_registered(id));
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rate metering for high-frequency events.
//!
//! A [`Meter`] holds a minimum interval per event type. An event of a metered
//! type aimed at a target is suppressed when it arrives sooner than that interval
//! after the last *delivered* event of the same type for the same target.
//! Suppressed events do not move the window.
//!
//! ```
//! use trellis_event_state::meter::{Meter, MeterResult};
//!
//! let mut meter: Meter<u32, &str> = Meter::new();
//! meter.set_interval("mouse_move", 16);
//!
//! assert_eq!(meter.admit("mouse_move", 7, 1000), MeterResult::Deliver);
//! assert_eq!(meter.admit("mouse_move", 7, 1010), MeterResult::Suppressed);
//! // Other targets have their own window.
//! assert_eq!(meter.admit("mouse_move", 8, 1010), MeterResult::Deliver);
//! assert_eq!(meter.admit("mouse_move", 7, 1016), MeterResult::Deliver);
//! // Unmetered types always pass.
//! assert_eq!(meter.admit("click", 7, 1016), MeterResult::Deliver);
//! ```

use core::hash::Hash;

use hashbrown::HashMap;

/// Decision for one event offered to a [`Meter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeterResult {
    /// Deliver the event; the window for its type and target restarts now.
    Deliver,
    /// Drop the event; it arrived inside the current window.
    Suppressed,
}

/// Per event type minimum intervals, tracked per target.
#[derive(Clone, Debug)]
pub struct Meter<K, T> {
    intervals: HashMap<T, u64>,
    last: HashMap<(T, K), u64>,
}

impl<K, T> Default for Meter<K, T> {
    fn default() -> Self {
        Self {
            intervals: HashMap::new(),
            last: HashMap::new(),
        }
    }
}

impl<K, T> Meter<K, T>
where
    K: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Create a meter with no metered types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum interval for `event_type`, in milliseconds.
    ///
    /// An interval of zero removes metering for the type.
    pub fn set_interval(&mut self, event_type: T, interval: u64) {
        if interval == 0 {
            self.intervals.remove(&event_type);
            self.last.retain(|(t, _), _| *t != event_type);
        } else {
            self.intervals.insert(event_type, interval);
        }
    }

    /// Minimum interval for `event_type`, if it is metered.
    pub fn interval(&self, event_type: T) -> Option<u64> {
        self.intervals.get(&event_type).copied()
    }

    /// Offer an event of `event_type` aimed at `target` at time `now`.
    pub fn admit(&mut self, event_type: T, target: K, now: u64) -> MeterResult {
        let Some(&interval) = self.intervals.get(&event_type) else {
            return MeterResult::Deliver;
        };
        match self.last.get_mut(&(event_type, target)) {
            Some(last) if now.saturating_sub(*last) < interval => MeterResult::Suppressed,
            Some(last) => {
                *last = now;
                MeterResult::Deliver
            }
            None => {
                self.last.insert((event_type, target), now);
                MeterResult::Deliver
            }
        }
    }

    /// Drop all windows kept for `target`.
    pub fn forget_target(&mut self, target: &K) {
        self.last.retain(|(_, k), _| k != target);
    }

    /// Drop all windows, keeping the configured intervals.
    pub fn reset(&mut self) {
        self.last.clear();
    }
}

/// A single rate limiter for work that is not tied to a target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Throttle {
    /// Minimum time between two accepted calls, in milliseconds.
    pub interval: u64,
    last: Option<u64>,
}

impl Throttle {
    /// Create a throttle with the given interval.
    pub const fn new(interval: u64) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true, and restarts the window, if work may run at `now`.
    pub fn ready(&mut self, now: u64) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted call so the next one passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click synthesis from pointer down/up pairs.
//!
//! [`ClickState`] remembers where a press started and decides, at release, whether
//! the pair amounts to a click on the pressed node. A second click on the same node
//! soon enough after the first is reported as a double click.
//!
//! ## Rules
//!
//! 1. **Same target**: down and up on the same node always click.
//! 2. **Different targets**: the press target still clicks when neither
//!    threshold is exceeded (the node may have moved under the pointer).
//!    Without thresholds, different targets never click.
//! 3. **Drag**: once [`ClickState::on_move`] reports the distance threshold as
//!    exceeded, a release on a different target is suppressed.
//! 4. **No press**: a release without a press is suppressed.
//!
//! ```
//! use kurbo::Point;
//! use trellis_event_state::click::{ClickResult, ClickState};
//!
//! let mut state: ClickState<u32> = ClickState::new();
//! state.on_down(42, Point::new(10.0, 20.0), 1000);
//! assert_eq!(
//!     state.on_up(&42, Point::new(11.0, 20.0), 1050),
//!     ClickResult::Click { target: 42, count: 1 }
//! );
//!
//! state.on_down(42, Point::new(10.0, 20.0), 1200);
//! assert_eq!(
//!     state.on_up(&42, Point::new(10.0, 20.0), 1250),
//!     ClickResult::Click { target: 42, count: 2 }
//! );
//! ```

use kurbo::Point;

/// Press in progress.
#[derive(Clone, Debug)]
pub struct Press<K> {
    /// Node under the pointer at press time.
    pub target: K,
    /// Pointer position at press time.
    pub position: Point,
    /// Press timestamp in milliseconds.
    pub time: u64,
    /// True once the pointer moved further than the distance threshold.
    pub distance_exceeded: bool,
}

#[derive(Clone, Debug)]
struct LastClick<K> {
    target: K,
    position: Point,
    time: u64,
    count: u32,
}

/// Outcome of a pointer release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickResult<K> {
    /// A click on `target`; `count` is 2 for the second click of a double click.
    Click {
        /// Node the press started on.
        target: K,
        /// 1 for a single click, 2 for a double click.
        count: u32,
    },
    /// No click. Carries the press target, if there was a press.
    Suppressed(Option<K>),
}

/// Click recognizer for a single pointer.
#[derive(Clone, Debug)]
pub struct ClickState<K> {
    press: Option<Press<K>>,
    last_click: Option<LastClick<K>>,
    /// Distance in pixels after which the press is treated as a drag.
    pub distance_threshold: Option<f64>,
    /// Time in milliseconds after which a release on another node no longer clicks.
    pub time_threshold: Option<u64>,
    /// Maximum time in milliseconds between two clicks of a double click.
    pub double_click_interval: u64,
}

impl<K> Default for ClickState<K> {
    fn default() -> Self {
        Self {
            press: None,
            last_click: None,
            distance_threshold: Some(5.0),
            time_threshold: Some(100),
            double_click_interval: 500,
        }
    }
}

impl<K: PartialEq + Clone> ClickState<K> {
    /// Create a recognizer with a 5 px distance, 100 ms time and 500 ms double-click window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recognizer with custom thresholds for different-target releases.
    pub fn with_thresholds(distance_threshold: Option<f64>, time_threshold: Option<u64>) -> Self {
        Self {
            distance_threshold,
            time_threshold,
            ..Self::default()
        }
    }

    /// Record a press on `target`. Replaces any press in progress.
    pub fn on_down(&mut self, target: K, position: Point, time: u64) {
        self.press = Some(Press {
            target,
            position,
            time,
            distance_exceeded: false,
        });
    }

    /// Track pointer motion during a press.
    ///
    /// Returns the press target the first time the distance threshold is exceeded.
    pub fn on_move(&mut self, position: Point) -> Option<K> {
        let threshold = self.distance_threshold?;
        let press = self.press.as_mut()?;
        if press.distance_exceeded || press.position.distance(position) <= threshold {
            return None;
        }
        press.distance_exceeded = true;
        Some(press.target.clone())
    }

    /// Resolve a release over `current_target`.
    pub fn on_up(&mut self, current_target: &K, position: Point, time: u64) -> ClickResult<K> {
        let Some(press) = self.press.take() else {
            return ClickResult::Suppressed(None);
        };

        if press.target != *current_target {
            if self.distance_threshold.is_none() && self.time_threshold.is_none() {
                return ClickResult::Suppressed(Some(press.target));
            }
            if press.distance_exceeded {
                return ClickResult::Suppressed(Some(press.target));
            }
            let distance_ok = self
                .distance_threshold
                .is_none_or(|t| press.position.distance(position) <= t);
            let time_ok = self
                .time_threshold
                .is_none_or(|t| time.saturating_sub(press.time) <= t);
            if !(distance_ok && time_ok) {
                return ClickResult::Suppressed(Some(press.target));
            }
        }

        let count = match &self.last_click {
            Some(last)
                if last.count == 1
                    && last.target == press.target
                    && time.saturating_sub(last.time) <= self.double_click_interval
                    && self
                        .distance_threshold
                        .is_none_or(|t| last.position.distance(position) <= t) =>
            {
                2
            }
            _ => 1,
        };
        self.last_click = Some(LastClick {
            target: press.target.clone(),
            position,
            time,
            count,
        });
        ClickResult::Click {
            target: press.target,
            count,
        }
    }

    /// Abandon the press in progress. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    /// The press in progress, if any.
    pub fn press(&self) -> Option<&Press<K>> {
        self.press.as_ref()
    }

    /// Forget any press or click history involving `target`.
    pub fn forget_target(&mut self, target: &K) {
        if self.press.as_ref().is_some_and(|p| p.target == *target) {
            self.press = None;
        }
        if self.last_click.as_ref().is_some_and(|c| c.target == *target) {
            self.last_click = None;
        }
    }
}

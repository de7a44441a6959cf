// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helpers: walk a dispatch sequence and honor stop outcomes.
//!
//! Two levels are involved:
//!
//! - [`run`] walks the node visits of a responder sequence. Any outcome other
//!   than [`Outcome::Continue`] ends the walk after the current visit.
//! - [`run_listeners`] runs the listeners of a single visit in order. A
//!   [`Outcome::Stop`] is remembered while the remaining listeners still run;
//!   [`Outcome::StopImmediate`] returns at once.
//!
//! Higher-level semantics such as "default prevented" live on the event payload
//! you pass in, not in [`Outcome`].
//!
//! ## Minimal example
//!
//! ```
//! use trellis_responder::dispatcher;
//! use trellis_responder::types::{Dispatch, Outcome, Phase};
//!
//! let seq: Vec<Dispatch<u32>> = vec![
//!     Dispatch::capture(1),
//!     Dispatch::capture(2),
//!     Dispatch::target(3),
//!     Dispatch::bubble(2),
//!     Dispatch::bubble(1),
//! ];
//!
//! // Stop in the first capture entry; target/bubble are skipped.
//! let mut seen: Vec<(Phase, u32)> = Vec::new();
//! let stopped = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push((d.phase, d.node));
//!     if d.phase == Phase::Capture && d.node == 1 { Outcome::Stop } else { Outcome::Continue }
//! });
//! assert_eq!(stopped.map(|d| d.node), Some(1));
//! assert_eq!(seen, vec![(Phase::Capture, 1)]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// - `seq`: a responder sequence, typically from
///   [`Router::dispatch_for`](crate::router::Router::dispatch_for).
/// - `event`: a mutable payload carried across handler calls; you own its shape.
/// - `handler`: called once per visit; its [`Outcome`] controls propagation.
///
/// Returns `None` if the full sequence was visited, or `Some(d)` with the visit
/// at which propagation stopped.
pub fn run<'a, K, E>(
    seq: &'a [Dispatch<K>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    for d in seq {
        if handler(d, event).is_stop() {
            return Some(d);
        }
    }
    None
}

/// Run the listeners of one visit in order and fold their outcomes.
///
/// `invoke` is called for each listener until one reports
/// [`Outcome::StopImmediate`]. The result is the strongest outcome observed:
/// `StopImmediate` if a listener requested it, otherwise `Stop` if any listener
/// requested it, otherwise `Continue`.
pub fn run_listeners<L, E>(
    listeners: impl IntoIterator<Item = L>,
    event: &mut E,
    mut invoke: impl FnMut(L, &mut E) -> Outcome,
) -> Outcome {
    let mut result = Outcome::Continue;
    for listener in listeners {
        match invoke(listener, event) {
            Outcome::Continue => {}
            Outcome::Stop => result = Outcome::Stop,
            Outcome::StopImmediate => return Outcome::StopImmediate,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use alloc::vec;
    use alloc::vec::Vec;

    fn mk_seq() -> Vec<Dispatch<u32>> {
        vec![
            Dispatch::capture(1),
            Dispatch::capture(2),
            Dispatch::target(3),
            Dispatch::bubble(2),
            Dispatch::bubble(1),
        ]
    }

    #[test]
    fn continue_through_all() {
        let seq = mk_seq();
        let mut seen: Vec<(Phase, u32)> = Vec::new();
        let stopped = run(&seq, &mut (), |d, _| {
            seen.push((d.phase, d.node));
            Outcome::Continue
        });
        assert!(stopped.is_none());
        assert_eq!(seen.len(), seq.len());
    }

    #[test]
    fn default_prevention_pattern_sets_flag_at_target() {
        #[derive(Default)]
        struct Ev {
            default_prevented: bool,
            seen: Vec<(Phase, u32)>,
        }

        let seq = mk_seq();
        let mut ev = Ev::default();
        let stopped = run(&seq, &mut ev, |d, e| {
            e.seen.push((d.phase, d.node));
            if matches!(d.phase, Phase::Target) {
                e.default_prevented = true;
            }
            Outcome::Continue
        });

        assert!(stopped.is_none());
        assert!(ev.default_prevented);
        assert_eq!(
            ev.seen,
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Target, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
    }

    #[test]
    fn stop_in_target_aborts_bubble_phase() {
        let seq = mk_seq();
        let mut seen: Vec<(Phase, u32)> = Vec::new();
        let stopped = run(&seq, &mut (), |d, _| {
            seen.push((d.phase, d.node));
            if matches!(d.phase, Phase::Target) {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        let stopped = stopped.unwrap();
        assert!(matches!(stopped.phase, Phase::Target));
        assert_eq!(stopped.node, 3);
        assert_eq!(
            seen,
            vec![(Phase::Capture, 1), (Phase::Capture, 2), (Phase::Target, 3)]
        );
    }

    #[test]
    fn stop_immediate_also_ends_the_walk() {
        let seq = mk_seq();
        let mut seen: Vec<(Phase, u32)> = Vec::new();
        let stopped = run(&seq, &mut (), |d, _| {
            seen.push((d.phase, d.node));
            if d.phase == Phase::Capture && d.node == 2 {
                Outcome::StopImmediate
            } else {
                Outcome::Continue
            }
        });
        assert_eq!(stopped.map(|d| d.node), Some(2));
        assert_eq!(seen, vec![(Phase::Capture, 1), (Phase::Capture, 2)]);
    }

    #[test]
    fn stop_lets_remaining_listeners_on_the_node_run() {
        let mut calls: Vec<&str> = Vec::new();
        let outcome = run_listeners(["a", "b", "c"], &mut calls, |l, calls| {
            calls.push(l);
            if l == "a" {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        assert_eq!(outcome, Outcome::Stop);
        assert_eq!(calls, vec!["a", "b", "c"]);
    }

    #[test]
    fn stop_immediate_skips_remaining_listeners() {
        let mut calls: Vec<&str> = Vec::new();
        let outcome = run_listeners(["a", "b", "c"], &mut calls, |l, calls| {
            calls.push(l);
            if l == "b" {
                Outcome::StopImmediate
            } else {
                Outcome::Continue
            }
        });
        assert_eq!(outcome, Outcome::StopImmediate);
        assert_eq!(calls, vec!["a", "b"]);
    }

    #[test]
    fn no_listeners_continue() {
        let outcome = run_listeners(core::iter::empty::<u8>(), &mut (), |_, _| Outcome::Stop);
        assert_eq!(outcome, Outcome::Continue);
    }
}

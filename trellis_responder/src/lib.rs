// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Responder: a deterministic, `no_std` responder chain for UI events.
//!
//! ## Overview
//!
//! This crate builds the responder sequence — capture → target → bubble — for a
//! target node and runs prioritized listeners over it.
//! It does not own a tree. Callers supply a [`ParentLookup`](crate::types::ParentLookup)
//! so the [`Router`](crate::router::Router) can reconstruct the root→target path,
//! and they own the event payload carried through the walk.
//!
//! ## Phases
//!
//! - Capture visits strict ancestors root→parent and only runs listeners registered with
//!   `use_capture = true`.
//! - Target visits the target itself and runs every listener registered on it.
//! - Bubble visits strict ancestors parent→root and only runs listeners registered with
//!   `use_capture = false`.
//!
//! The target never appears in the capture or bubble phases.
//!
//! ## Listeners
//!
//! [`ListenerTable`](crate::listeners::ListenerTable) stores callbacks per node and
//! event type. [`ListenerTable::select`](crate::listeners::ListenerTable::select)
//! returns the listeners for a node/phase in invocation order: higher priority
//! first, ties in registration order.
//!
//! ## Dispatcher
//!
//! [`dispatcher::run`] walks a sequence node by node; [`dispatcher::run_listeners`]
//! runs the listeners of one node and folds their [`Outcome`](crate::types::Outcome)s:
//!
//! - [`Outcome::Stop`](crate::types::Outcome::Stop) lets the remaining listeners on the
//!   current node run, then ends the walk.
//! - [`Outcome::StopImmediate`](crate::types::Outcome::StopImmediate) ends it at once.
//!
//! ```
//! use trellis_responder::dispatcher;
//! use trellis_responder::router::Router;
//! use trellis_responder::types::{Outcome, ParentLookup, Phase};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//! }
//!
//! let seq = Router::<u32, _>::new(Parents).dispatch_for(3);
//! let mut seen = Vec::new();
//! let stopped = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push((d.phase, d.node));
//!     Outcome::Continue
//! });
//! assert!(stopped.is_none());
//! assert_eq!(seen, vec![
//!     (Phase::Capture, 1), (Phase::Capture, 2),
//!     (Phase::Target, 3),
//!     (Phase::Bubble, 2), (Phase::Bubble, 1),
//! ]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod listeners;
pub mod router;
pub mod types;

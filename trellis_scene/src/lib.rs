// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Scene: a retained-mode tree of display objects.
//!
//! A [`Scene`] owns every node, addressed by a generational [`NodeId`] or by a
//! name-based [`Handle`] that survives across frames and goes stale, rather
//! than dangling, when its node is destroyed.
//!
//! - Nodes are built by type name from [`Properties`] through registered
//!   factories; `"node"` is the plain container type.
//! - Each node sits under at most one parent. Siblings are kept in ascending
//!   priority, so the last child paints on top and is hit first.
//! - Events travel in three phases (capture from the root, target, bubble
//!   back up) through listeners registered per node and event type. Listener
//!   priority orders calls on one node; `stop_propagation` and
//!   `stop_immediate_propagation` end the walk.
//! - Event types are interned in an [`EventTypeRegistry`] shared with the
//!   [`builtin`] names; high-rate types such as `mouse_move` are metered.
//! - Detached nodes become orphans and are destroyed immediately, after a
//!   grace period, or never, per their [`RetentionPolicy`].
//! - One keyboard focus slot and one hover slot, each announcing changes with
//!   paired leave/enter events, plus tab-order traversal.
//!
//! Structural edits made from inside a listener or behavior hook are queued
//! and applied once the outermost walk finishes.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use trellis_scene::{ListenerOptions, Phase, Properties, Scene};
//!
//! let mut scene = Scene::new();
//! let panel = scene
//!     .create("node", &Properties::new().with("name", "panel").with("parent", "root"))
//!     .unwrap();
//! let button = scene
//!     .create("node", &Properties::new().with("name", "ok").with("parent", "panel"))
//!     .unwrap();
//!
//! let phases = Rc::new(RefCell::new(Vec::new()));
//! for (node, options) in [
//!     (&panel, ListenerOptions::capture()),
//!     (&button, ListenerOptions::default()),
//!     (&panel, ListenerOptions::default()),
//! ] {
//!     let phases = phases.clone();
//!     scene
//!         .add_event_listener(node, "click", options, move |event, _| {
//!             phases.borrow_mut().extend(event.phase());
//!             Ok(())
//!         })
//!         .unwrap();
//! }
//!
//! scene.emit("click", &button).unwrap();
//! scene.tick(16);
//! assert_eq!(*phases.borrow(), [Phase::Capture, Phase::Target, Phase::Bubble]);
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: dropped events, listener
//! errors and rejected deferred edits at `warn`, focus and collection activity
//! at `debug`, per-event metering at `trace`.

mod behavior;
mod config;
mod deferred;
mod dispatch;
mod error;
mod event;
mod focus;
mod frame;
mod handle;
mod node;
mod orphan;
mod scene;
mod tree;
mod types;
mod value;

pub use behavior::{Behavior, Container, Factory, Painter};
pub use config::{NodeConfig, SceneConfig};
pub use dispatch::EventTypeRef;
pub use error::{ConfigError, ListenerError, SceneError};
pub use event::Event;
pub use handle::{AsNode, Handle};
pub use node::Node;
pub use scene::{CONTAINER_TYPE, ROOT_NAME, Scene};
pub use types::{Anchors, NodeFlags, NodeId, RetentionPolicy};
pub use value::{Properties, Value};

pub use trellis_event_types::{Category, EventTypeDescriptor, EventTypeId, EventTypeRegistry, builtin};
pub use trellis_responder::listeners::{ListenerId, ListenerOptions};
pub use trellis_responder::types::Phase;

pub use kurbo;

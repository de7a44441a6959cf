// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Event Types: a runtime-extensible catalog of event kinds.
//!
//! Every event dispatched through a Trellis scene refers to an [`EventTypeId`].
//! Ids are handed out by an [`EventTypeRegistry`] the first time a name is
//! registered and never change afterwards, so they can be cached by listeners
//! and tooling for the lifetime of the process.
//!
//! An id packs two things into a `u32`:
//! - the [`Category`] the type was registered under (upper bits, never zero),
//! - a registry-wide index (lower [`INDEX_BITS`] bits).
//!
//! The descriptor metadata (documentation and category label) may be updated
//! later through [`EventTypeRegistry::update`]; the id keeps the category it
//! was minted with.
//!
//! ## Built-in kinds
//!
//! [`EventTypeRegistry::with_builtins`] pre-registers the core kinds listed in
//! [`builtin`] (lifecycle, input, window, UI state, drag and drop, timer,
//! clipboard, render). User code can register more at any time.
//!
//! ```rust
//! use trellis_event_types::{Category, EventTypeRegistry, builtin};
//!
//! let mut registry = EventTypeRegistry::with_builtins();
//! let click = registry.find_by_name(builtin::CLICK).unwrap();
//! assert_eq!(click.category(), Category::INPUT);
//!
//! let custom = registry
//!     .register("score_changed", Category::USER, "Game score changed.")
//!     .unwrap();
//! assert_eq!(registry.find_by_name("score_changed"), Some(custom));
//! assert!(registry.register("score_changed", Category::USER, "").is_err());
//! ```
//!
//! ## Paging
//!
//! [`EventTypeRegistry::enumerate`] walks all descriptors with an opaque
//! [`Cursor`], which is convenient for tooling that lists types a page at a
//! time.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod builtin;
mod error;
mod registry;
mod types;

pub use error::EventTypeError;
pub use registry::{Cursor, EventTypeRegistry};
pub use types::{CATEGORY_SHIFT, Category, EventTypeDescriptor, EventTypeId, INDEX_BITS, INDEX_MASK};

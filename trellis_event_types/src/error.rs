// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::EventTypeId;

/// Errors reported by [`EventTypeRegistry`](crate::EventTypeRegistry).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventTypeError {
    /// Event type names must not be empty.
    #[error("event type name is empty")]
    EmptyName,
    /// The name is already registered; use `update` to change its metadata.
    #[error("event type `{name}` is already registered as {id}")]
    Duplicate {
        /// The offending name.
        name: String,
        /// Id the name already has.
        id: EventTypeId,
    },
    /// Every index representable in an id has been handed out.
    #[error("event type index space is exhausted")]
    Exhausted,
    /// No event type has this id.
    #[error("no event type with id {0}")]
    UnknownId(EventTypeId),
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;
use trellis_event_types::EventTypeError;

/// Invalid node configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A recognised key holds a value of the wrong kind.
    #[error("`{key}` must be {expected}")]
    InvalidField {
        /// The offending key.
        key: String,
        /// Kind of value the key takes.
        expected: &'static str,
    },
    /// A key the node type cannot do without is absent.
    #[error("missing required field `{0}`")]
    MissingField(String),
    /// A value has the right kind but is out of range or malformed.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// The offending key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors reported by [`Scene`](crate::Scene) operations.
#[derive(Debug, Error)]
pub enum SceneError {
    /// No factory is registered under this type name.
    #[error("unknown node type `{0}`")]
    UnknownType(String),
    /// Another live node already uses this name.
    #[error("a node named `{0}` already exists")]
    DuplicateName(String),
    /// Node names must not be empty.
    #[error("node name is empty")]
    EmptyName,
    /// The creation config was rejected.
    #[error("invalid configuration for a `{type_name}` node")]
    Config {
        /// Type that was being created.
        type_name: String,
        /// What was wrong.
        source: ConfigError,
    },
    /// A node reference did not resolve to a live node.
    #[error("node reference does not resolve to a live node")]
    StaleHandle,
    /// The mutation would make a node its own ancestor.
    #[error("`{child}` cannot be added under its own descendant `{parent}`")]
    Cycle {
        /// Intended parent.
        parent: String,
        /// Node that was to be attached.
        child: String,
    },
    /// The node is already a child of that parent.
    #[error("`{child}` is already a child of `{parent}`")]
    AlreadyChild {
        /// Parent name.
        parent: String,
        /// Child name.
        child: String,
    },
    /// The node is not a child of that parent.
    #[error("`{child}` is not a child of `{parent}`")]
    NotAChild {
        /// Parent name.
        parent: String,
        /// Child name.
        child: String,
    },
    /// A sibling already holds the extreme priority, so the node cannot be
    /// placed strictly above (or below) it.
    #[error("no priority is left above or below the siblings of `{0}`")]
    PriorityOverflow(String),
    /// The root node cannot take part in this operation.
    #[error("the root node cannot be {0}")]
    RootNode(&'static str),
    /// No event type is registered under this name or id.
    #[error("unknown event type `{0}`")]
    UnknownEventType(String),
    /// Event type registration failed.
    #[error(transparent)]
    EventType(#[from] EventTypeError),
}

/// Error returned by a listener callback.
///
/// Listener errors are logged and never stop the dispatch.
pub type ListenerError = Box<dyn std::error::Error>;

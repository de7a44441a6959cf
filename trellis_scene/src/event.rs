// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event instances.

use trellis_event_types::EventTypeId;
use trellis_responder::types::{Outcome, Phase};

use crate::types::NodeId;
use crate::value::{Properties, Value};

/// One dispatch of an event type at a target node.
///
/// Build one with [`Scene::event`](crate::Scene::event) (or [`Event::new`] when
/// the type id is at hand), then hand it to
/// [`Scene::queue_event`](crate::Scene::queue_event) or
/// [`Scene::dispatch_event`](crate::Scene::dispatch_event).
#[derive(Clone, Debug)]
pub struct Event {
    pub(crate) event_type: EventTypeId,
    pub(crate) target: NodeId,
    pub(crate) current: Option<NodeId>,
    pub(crate) phase: Option<Phase>,
    pub(crate) payload: Properties,
    pub(crate) timestamp: u64,
    pub(crate) related: Option<NodeId>,
    propagation_stopped: bool,
    immediate_stopped: bool,
    default_prevented: bool,
}

impl Event {
    /// Create an event of `event_type` aimed at `target`, with an empty payload.
    pub fn new(event_type: EventTypeId, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current: None,
            phase: None,
            payload: Properties::new(),
            timestamp: 0,
            related: None,
            propagation_stopped: false,
            immediate_stopped: false,
            default_prevented: false,
        }
    }

    /// Add a payload entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.set(key, value);
        self
    }

    /// Set the related node (the other party of a focus or hover change).
    #[must_use]
    pub fn with_related(mut self, node: NodeId) -> Self {
        self.related = Some(node);
        self
    }

    /// Event type.
    pub fn event_type(&self) -> EventTypeId {
        self.event_type
    }

    /// Node the event is aimed at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node whose listeners are running, during dispatch.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current
    }

    /// Phase being dispatched, during dispatch.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Payload.
    pub fn payload(&self) -> &Properties {
        &self.payload
    }

    /// Mutable payload; listeners may use it to pass data along the path.
    pub fn payload_mut(&mut self) -> &mut Properties {
        &mut self.payload
    }

    /// Scene time, in milliseconds, at which the event was queued.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Related node, if any.
    pub fn related(&self) -> Option<NodeId> {
        self.related
    }

    /// Finish the current node's listeners, then stop visiting nodes.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop right away, skipping the current node's remaining listeners.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_stopped = true;
    }

    /// Ask the target's behavior not to run its default handling.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether propagation was stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Whether immediate propagation was stopped.
    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_stopped
    }

    /// Whether the default was prevented.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn outcome(&self) -> Outcome {
        if self.immediate_stopped {
            Outcome::StopImmediate
        } else if self.propagation_stopped {
            Outcome::Stop
        } else {
            Outcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_event_types::{EventTypeRegistry, builtin};

    fn click() -> EventTypeId {
        EventTypeRegistry::with_builtins()
            .find_by_name(builtin::CLICK)
            .unwrap()
    }

    #[test]
    fn outcome_follows_flags() {
        let mut event = Event::new(click(), NodeId::new(0, 1));
        assert_eq!(event.outcome(), Outcome::Continue);
        event.stop_propagation();
        assert_eq!(event.outcome(), Outcome::Stop);
        event.stop_immediate_propagation();
        assert_eq!(event.outcome(), Outcome::StopImmediate);
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn builder_sets_payload_and_related() {
        let event = Event::new(click(), NodeId::new(1, 1))
            .with("x", 3.0)
            .with_related(NodeId::new(2, 1));
        assert_eq!(event.payload().get_float("x").unwrap(), Some(3.0));
        assert_eq!(event.related(), Some(NodeId::new(2, 1)));
        assert!(!event.is_default_prevented());
    }
}

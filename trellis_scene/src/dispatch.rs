// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event types, listeners, the event queue and three-phase dispatch.
//!
//! ## Dispatch
//!
//! The path from the root to the target is computed when an event is
//! dispatched, not when it is queued. An event whose target is stale or not
//! attached under the root by then is dropped with a warning.
//!
//! The walk visits, in order:
//!
//! 1. each strict ancestor, root first, running its capture listeners;
//! 2. the target, running all of its listeners and then its behavior's
//!    [`on_event`](crate::Behavior::on_event);
//! 3. each strict ancestor, parent first, running its bubble listeners.
//!
//! On one node, listeners run by descending priority, ties in registration
//! order. [`Event::stop_propagation`] lets the current node's remaining
//! listeners run and then ends the walk; [`Event::stop_immediate_propagation`]
//! ends it right away. A listener returning an error is logged and the walk
//! goes on.
//!
//! Structural changes made by listeners are deferred until the walk is over.

use trellis_event_state::meter::MeterResult;
use trellis_event_types::{Category, EventTypeId, EventTypeRegistry};
use trellis_responder::dispatcher;
use trellis_responder::listeners::{ListenerId, ListenerOptions};
use trellis_responder::router::Router;
use trellis_responder::types::{Dispatch, Outcome, ParentLookup, Phase};

use crate::error::{ListenerError, SceneError};
use crate::event::Event;
use crate::handle::AsNode;
use crate::scene::Scene;
use crate::types::NodeId;

/// Anything that names an event type: an [`EventTypeId`] or a registered name.
pub trait EventTypeRef {
    /// Resolve against `registry`.
    fn resolve_type(&self, registry: &EventTypeRegistry) -> Result<EventTypeId, SceneError>;
}

impl EventTypeRef for EventTypeId {
    fn resolve_type(&self, registry: &EventTypeRegistry) -> Result<EventTypeId, SceneError> {
        match registry.get(*self) {
            Some(_) => Ok(*self),
            None => Err(SceneError::UnknownEventType(self.to_string())),
        }
    }
}

impl EventTypeRef for str {
    fn resolve_type(&self, registry: &EventTypeRegistry) -> Result<EventTypeId, SceneError> {
        registry
            .find_by_name(self)
            .ok_or_else(|| SceneError::UnknownEventType(self.to_owned()))
    }
}

impl EventTypeRef for String {
    fn resolve_type(&self, registry: &EventTypeRegistry) -> Result<EventTypeId, SceneError> {
        self.as_str().resolve_type(registry)
    }
}

impl<T: EventTypeRef + ?Sized> EventTypeRef for &T {
    fn resolve_type(&self, registry: &EventTypeRegistry) -> Result<EventTypeId, SceneError> {
        (**self).resolve_type(registry)
    }
}

impl ParentLookup<NodeId> for Scene {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node)?.parent
    }
}

impl Scene {
    /// The event type registry.
    pub fn event_types(&self) -> &EventTypeRegistry {
        &self.event_types
    }

    /// Register a new event type.
    pub fn register_event_type(
        &mut self,
        name: &str,
        category: Category,
        doc: &str,
    ) -> Result<EventTypeId, SceneError> {
        let id = self.event_types.register(name, category, doc)?;
        log::debug!("registered event type `{name}` as {id}");
        Ok(id)
    }

    /// Change the documentation and/or category label of an event type.
    pub fn update_event_type(
        &mut self,
        id: EventTypeId,
        doc: Option<&str>,
        category: Option<Category>,
    ) -> Result<(), SceneError> {
        Ok(self.event_types.update(id, doc, category)?)
    }

    /// Resolve an event type reference.
    pub fn event_type(&self, ty: impl EventTypeRef) -> Result<EventTypeId, SceneError> {
        ty.resolve_type(&self.event_types)
    }

    /// Set the minimum interval, in milliseconds, between delivered events of
    /// `ty` at the same target. Zero turns metering off for the type.
    pub fn set_meter_interval(&mut self, ty: impl EventTypeRef, interval: u64) -> Result<(), SceneError> {
        let ty = self.event_type(ty)?;
        self.meter.set_interval(ty, interval);
        Ok(())
    }

    /// Register a listener for `ty` on `node`.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use trellis_scene::{ListenerOptions, Properties, Scene};
    ///
    /// let mut scene = Scene::new();
    /// let button = scene
    ///     .create("node", &Properties::new().with("name", "ok").with("parent", "root"))
    ///     .unwrap();
    ///
    /// let clicks = Rc::new(Cell::new(0));
    /// let seen = clicks.clone();
    /// scene
    ///     .add_event_listener(&button, "click", ListenerOptions::default(), move |_, _| {
    ///         seen.set(seen.get() + 1);
    ///         Ok(())
    ///     })
    ///     .unwrap();
    ///
    /// scene.emit("click", &button).unwrap();
    /// scene.pump_events();
    /// assert_eq!(clicks.get(), 1);
    /// ```
    pub fn add_event_listener<F>(
        &mut self,
        node: impl AsNode,
        ty: impl EventTypeRef,
        options: ListenerOptions,
        callback: F,
    ) -> Result<ListenerId, SceneError>
    where
        F: FnMut(&mut Event, &mut Self) -> Result<(), ListenerError> + 'static,
    {
        let node = self.require(node)?;
        let ty = self.event_type(ty)?;
        Ok(self.listeners.add(node, ty, options, Box::new(callback)))
    }

    /// Register a bubble-phase listener with default priority.
    pub fn on<F>(&mut self, node: impl AsNode, ty: impl EventTypeRef, callback: F) -> Result<ListenerId, SceneError>
    where
        F: FnMut(&mut Event, &mut Self) -> Result<(), ListenerError> + 'static,
    {
        self.add_event_listener(node, ty, ListenerOptions::default(), callback)
    }

    /// Remove a listener. Returns false if it was not registered.
    ///
    /// A listener removed during a dispatch is not called again by it.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Remove the listeners for `ty` on `node`, optionally only those with the
    /// given capture flag. Returns how many were removed.
    pub fn remove_event_listeners(
        &mut self,
        node: impl AsNode,
        ty: impl EventTypeRef,
        use_capture: Option<bool>,
    ) -> usize {
        match (node.resolve_in(self), self.event_type(ty)) {
            (Some(node), Ok(ty)) => self.listeners.remove_matching(&node, &ty, use_capture),
            _ => 0,
        }
    }

    /// Whether `node` has a listener for `ty`, optionally with the given capture flag.
    pub fn has_event_listener(&self, node: impl AsNode, ty: impl EventTypeRef, use_capture: Option<bool>) -> bool {
        match (node.resolve_in(self), self.event_type(ty)) {
            (Some(node), Ok(ty)) => self.listeners.contains(&node, &ty, use_capture),
            _ => false,
        }
    }

    /// Build an event of `ty` aimed at `target`.
    pub fn event(&self, ty: impl EventTypeRef, target: impl AsNode) -> Result<Event, SceneError> {
        let ty = self.event_type(ty)?;
        let target = self.require(target)?;
        Ok(Event::new(ty, target))
    }

    /// Queue an event for the next [`pump_events`](Self::pump_events).
    ///
    /// The event is stamped with the current time. Returns false when metering
    /// suppressed it.
    pub fn queue_event(&mut self, mut event: Event) -> bool {
        event.timestamp = self.now;
        if self.meter.admit(event.event_type, event.target, self.now) == MeterResult::Suppressed {
            log::trace!(
                "metered `{}` at `{}`",
                self.type_label(event.event_type),
                self.describe(event.target)
            );
            return false;
        }
        self.queue.push_back(event);
        true
    }

    /// Build and queue an event with an empty payload.
    pub fn emit(&mut self, ty: impl EventTypeRef, target: impl AsNode) -> Result<bool, SceneError> {
        let event = self.event(ty, target)?;
        Ok(self.queue_event(event))
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch the events queued so far, in FIFO order.
    ///
    /// Events queued while pumping wait for the next pump. Returns how many
    /// events were delivered (dropped events are not counted).
    pub fn pump_events(&mut self) -> usize {
        let batch = core::mem::take(&mut self.queue);
        let mut delivered = 0;
        for event in batch {
            if self.dispatch_now(event).is_some() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Dispatch an event right away, bypassing the queue and metering.
    ///
    /// Returns the event after dispatch, or `None` if it was dropped because
    /// its target is stale or detached.
    pub fn dispatch_event(&mut self, mut event: Event) -> Option<Event> {
        event.timestamp = self.now;
        self.dispatch_now(event)
    }

    // --- internals ---

    /// Build and queue a built-in event at `target`.
    pub(crate) fn queue_builtin(&mut self, name: &str, target: NodeId) -> bool {
        match self.event_types.find_by_name(name) {
            Some(ty) => self.queue_event(Event::new(ty, target)),
            None => false,
        }
    }

    /// Build and dispatch a built-in event at `target` right away.
    pub(crate) fn dispatch_builtin(&mut self, name: &str, target: NodeId, related: Option<NodeId>) {
        let Some(ty) = self.event_types.find_by_name(name) else {
            return;
        };
        let mut event = Event::new(ty, target);
        event.related = related;
        self.dispatch_event(event);
    }

    fn dispatch_now(&mut self, mut event: Event) -> Option<Event> {
        if !self.is_attached(event.target) {
            log::warn!(
                "dropping `{}` event: target {} is stale or detached",
                self.type_label(event.event_type),
                self.describe(event.target)
            );
            return None;
        }
        let seq = Router::<NodeId, _>::new(&*self).dispatch_for(event.target);
        log::trace!(
            "dispatching `{}` at `{}` over {} visits",
            self.type_label(event.event_type),
            self.describe(event.target),
            seq.len()
        );

        self.begin_traversal();
        let stopped = dispatcher::run(&seq, &mut event, |d, event| self.visit(d, event));
        self.end_traversal();

        if let Some(d) = stopped {
            log::trace!("propagation stopped at `{}` ({:?})", self.describe(d.node), d.phase);
        }
        event.current = None;
        event.phase = None;
        Some(event)
    }

    fn visit(&mut self, d: &Dispatch<NodeId>, event: &mut Event) -> Outcome {
        event.current = Some(d.node);
        event.phase = Some(d.phase);
        let ids = self.listeners.select(&d.node, &event.event_type, d.phase);
        let outcome = dispatcher::run_listeners(ids, event, |id, event| self.invoke(id, event));
        if d.phase == Phase::Target && outcome != Outcome::StopImmediate && !event.is_default_prevented() {
            self.with_behavior(d.node, |behavior, scene| behavior.on_event(event, scene));
        }
        event.outcome()
    }

    fn invoke(&mut self, id: ListenerId, event: &mut Event) -> Outcome {
        let once = self.listeners.options(id).is_some_and(|o| o.once);
        // Removed earlier in this dispatch, or already running further up the stack.
        let Some(mut callback) = self.listeners.take(id) else {
            return event.outcome();
        };
        if once {
            self.listeners.remove(id);
        }
        if let Err(err) = callback(event, self) {
            log::warn!(
                "listener {} for `{}` on `{}` failed: {err}",
                id.get(),
                self.type_label(event.event_type),
                event.current.map_or_else(String::new, |n| self.describe(n))
            );
        }
        if !once {
            self.listeners.restore(id, callback);
        }
        event.outcome()
    }

    /// Registered name of an event type for log lines.
    pub(crate) fn type_label(&self, ty: EventTypeId) -> String {
        self.event_types
            .name_of(ty)
            .map_or_else(|| ty.to_string(), str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::error::ConfigError;
    use crate::value::Properties;
    use std::cell::RefCell;
    use std::rc::Rc;
    use trellis_event_types::builtin;

    type Log = Rc<RefCell<Vec<String>>>;

    fn record(log: &Log, label: &str) -> impl FnMut(&mut Event, &mut Scene) -> Result<(), ListenerError> + 'static {
        let log = log.clone();
        let label = label.to_owned();
        move |_, _| {
            log.borrow_mut().push(label.clone());
            Ok(())
        }
    }

    /// root -> a -> b
    fn chain() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let a = scene
            .create("node", &Properties::new().with("name", "a").with("parent", "root"))
            .unwrap();
        let b = scene
            .create("node", &Properties::new().with("name", "b").with("parent", "a"))
            .unwrap();
        let a = a.resolve(&scene).unwrap();
        let b = b.resolve(&scene).unwrap();
        (scene, a, b)
    }

    fn listen(scene: &mut Scene, node: NodeId, options: ListenerOptions, log: &Log, label: &str) -> ListenerId {
        scene
            .add_event_listener(node, builtin::CLICK, options, record(log, label))
            .unwrap()
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn phases_run_capture_target_bubble() {
        let (mut scene, a, b) = chain();
        let root = scene.root();
        let log = Log::default();
        let capture = ListenerOptions::capture();
        let bubble = ListenerOptions::default();

        listen(&mut scene, root, bubble, &log, "root-bubble");
        listen(&mut scene, root, capture, &log, "root-capture");
        listen(&mut scene, a, bubble, &log, "a-bubble");
        listen(&mut scene, a, capture, &log, "a-capture");
        listen(&mut scene, b, bubble, &log, "b-target");
        listen(&mut scene, b, capture, &log, "b-target-capture");

        let event = scene.event(builtin::CLICK, b).unwrap();
        let event = scene.dispatch_event(event).unwrap();
        assert_eq!(
            entries(&log),
            [
                "root-capture",
                "a-capture",
                "b-target",
                "b-target-capture",
                "a-bubble",
                "root-bubble"
            ]
        );
        assert_eq!(event.current_target(), None);
        assert_eq!(event.phase(), None);
    }

    #[test]
    fn listeners_see_phase_and_current_target() {
        let (mut scene, a, b) = chain();
        let seen: Rc<RefCell<Vec<(Option<Phase>, Option<NodeId>)>>> = Rc::default();
        for (node, options) in [
            (a, ListenerOptions::capture()),
            (b, ListenerOptions::default()),
            (a, ListenerOptions::default()),
        ] {
            let seen = seen.clone();
            scene
                .add_event_listener(node, builtin::CLICK, options, move |event, _| {
                    assert_eq!(event.target(), b, "target is fixed for the whole walk");
                    seen.borrow_mut().push((event.phase(), event.current_target()));
                    Ok(())
                })
                .unwrap();
        }
        scene.emit(builtin::CLICK, b).unwrap();
        assert_eq!(scene.pump_events(), 1);
        assert_eq!(
            *seen.borrow(),
            [
                (Some(Phase::Capture), Some(a)),
                (Some(Phase::Target), Some(b)),
                (Some(Phase::Bubble), Some(a)),
            ]
        );
    }

    #[test]
    fn priority_orders_listeners_on_one_node() {
        let (mut scene, _, b) = chain();
        let log = Log::default();
        let options = ListenerOptions::default();
        listen(&mut scene, b, options.with_priority(-1), &log, "low");
        listen(&mut scene, b, options, &log, "first");
        listen(&mut scene, b, options.with_priority(5), &log, "high");
        listen(&mut scene, b, options, &log, "second");

        scene.emit(builtin::CLICK, b).unwrap();
        scene.pump_events();
        assert_eq!(entries(&log), ["high", "first", "second", "low"]);
    }

    fn stopping_chain(immediate: bool) -> Vec<String> {
        let (mut scene, a, b) = chain();
        let root = scene.root();
        let log = Log::default();
        listen(&mut scene, root, ListenerOptions::capture(), &log, "root-capture");
        listen(&mut scene, root, ListenerOptions::default(), &log, "root-bubble");
        let stopper = log.clone();
        scene
            .add_event_listener(
                a,
                builtin::CLICK,
                ListenerOptions::capture().with_priority(10),
                move |event, _| {
                    stopper.borrow_mut().push("a-stop".into());
                    if immediate {
                        event.stop_immediate_propagation();
                    } else {
                        event.stop_propagation();
                    }
                    Ok(())
                },
            )
            .unwrap();
        listen(&mut scene, a, ListenerOptions::capture(), &log, "a-capture");
        listen(&mut scene, b, ListenerOptions::default(), &log, "b-target");
        listen(&mut scene, a, ListenerOptions::default(), &log, "a-bubble");

        let event = scene.event(builtin::CLICK, b).unwrap();
        let event = scene.dispatch_event(event).unwrap();
        assert!(event.is_propagation_stopped());
        assert_eq!(event.is_immediate_propagation_stopped(), immediate);
        entries(&log)
    }

    #[test]
    fn stop_propagation_finishes_the_current_node() {
        assert_eq!(stopping_chain(false), ["root-capture", "a-stop", "a-capture"]);
    }

    #[test]
    fn stop_immediate_propagation_skips_the_rest_of_the_node() {
        assert_eq!(stopping_chain(true), ["root-capture", "a-stop"]);
    }

    #[test]
    fn failing_listener_does_not_abort_dispatch() {
        let (mut scene, a, b) = chain();
        let log = Log::default();
        scene
            .add_event_listener(b, builtin::CLICK, ListenerOptions::default().with_priority(1), |_, _| {
                Err("boom".into())
            })
            .unwrap();
        listen(&mut scene, b, ListenerOptions::default(), &log, "b-after");
        listen(&mut scene, a, ListenerOptions::default(), &log, "a-bubble");

        scene.emit(builtin::CLICK, b).unwrap();
        assert_eq!(scene.pump_events(), 1);
        assert_eq!(entries(&log), ["b-after", "a-bubble"]);
        assert!(scene.has_event_listener(b, builtin::CLICK, None), "a failing listener stays");
    }

    #[test]
    fn events_for_stale_or_detached_targets_are_dropped() {
        let (mut scene, a, b) = chain();
        let log = Log::default();
        listen(&mut scene, a, ListenerOptions::default(), &log, "a");
        scene.set_orphan_retention_policy(a, crate::RetentionPolicy::Retain).unwrap();

        scene.emit(builtin::CLICK, b).unwrap();
        scene.emit(builtin::CLICK, a).unwrap();
        scene.remove_child("root", a).unwrap();
        assert_eq!(scene.pump_events(), 0);

        scene.destroy(a).unwrap();
        let event = Event::new(scene.event_type(builtin::CLICK).unwrap(), b);
        assert!(scene.dispatch_event(event).is_none());
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn motion_events_are_metered_per_target() {
        let (mut scene, a, b) = chain();
        let moved = |scene: &mut Scene, node: NodeId, t: u64| {
            scene.set_time(t);
            scene.emit(builtin::MOUSE_MOVE, node).unwrap()
        };
        assert!(moved(&mut scene, b, 0));
        assert!(!moved(&mut scene, b, 10), "within 16 ms of the last delivery");
        assert!(moved(&mut scene, a, 10), "other targets are metered separately");
        assert!(moved(&mut scene, b, 16));
        assert_eq!(scene.pending_events(), 3);

        // Clicks are never metered unless asked to be.
        assert!(scene.emit(builtin::CLICK, b).unwrap());
        assert!(scene.emit(builtin::CLICK, b).unwrap());
        scene.set_meter_interval(builtin::CLICK, 100).unwrap();
        assert!(scene.emit(builtin::CLICK, a).unwrap());
        assert!(!scene.emit(builtin::CLICK, a).unwrap());
    }

    #[test]
    fn once_listeners_fire_a_single_time() {
        let (mut scene, _, b) = chain();
        let log = Log::default();
        let id = listen(&mut scene, b, ListenerOptions::default().once(), &log, "once");
        scene.emit(builtin::CLICK, b).unwrap();
        scene.emit(builtin::CLICK, b).unwrap();
        assert_eq!(scene.pump_events(), 2);
        assert_eq!(entries(&log), ["once"]);
        assert!(!scene.remove_event_listener(id));
        assert!(!scene.has_event_listener(b, builtin::CLICK, None));
    }

    #[test]
    fn listeners_removed_mid_dispatch_are_skipped() {
        let (mut scene, a, b) = chain();
        let log = Log::default();
        let victim = listen(&mut scene, b, ListenerOptions::default(), &log, "victim");
        scene
            .add_event_listener(a, builtin::CLICK, ListenerOptions::capture(), move |_, scene| {
                scene.remove_event_listener(victim);
                Ok(())
            })
            .unwrap();
        scene.emit(builtin::CLICK, b).unwrap();
        scene.pump_events();
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn destroy_inside_a_listener_waits_for_the_walk() {
        let (mut scene, a, b) = chain();
        let log = Log::default();
        scene
            .on(b, builtin::CLICK, |event, scene| {
                scene.destroy(event.target())?;
                Ok(())
            })
            .unwrap();
        let bubble_log = log.clone();
        scene
            .on(a, builtin::CLICK, move |_, scene| {
                let alive = scene.is_alive(b);
                bubble_log.borrow_mut().push(format!("b alive: {alive}"));
                Ok(())
            })
            .unwrap();

        scene.emit(builtin::CLICK, b).unwrap();
        assert_eq!(scene.pump_events(), 1);
        assert_eq!(entries(&log), ["b alive: true"]);
        assert!(!scene.is_alive(b));
        assert!(!scene.is_traversing());
        assert!(!scene.has_event_listener(b, builtin::CLICK, None));
    }

    #[test]
    fn listeners_can_be_removed_by_match() {
        let (mut scene, _, b) = chain();
        let log = Log::default();
        listen(&mut scene, b, ListenerOptions::capture(), &log, "c");
        listen(&mut scene, b, ListenerOptions::default(), &log, "b1");
        listen(&mut scene, b, ListenerOptions::default(), &log, "b2");
        assert!(scene.has_event_listener(b, builtin::CLICK, Some(true)));
        assert_eq!(scene.remove_event_listeners(b, builtin::CLICK, Some(false)), 2);
        assert!(!scene.has_event_listener(b, builtin::CLICK, Some(false)));
        assert!(scene.has_event_listener(b, builtin::CLICK, None));
        assert!(!scene.has_event_listener(b, "no_such_event", None));
    }

    #[test]
    fn pump_drains_a_snapshot_in_fifo_order() {
        let (mut scene, a, b) = chain();
        let log = Log::default();
        let echo = log.clone();
        scene
            .on(b, builtin::CLICK, move |event, scene| {
                echo.borrow_mut().push(format!("click {}", event.payload().get_int("n")?.unwrap_or(0)));
                scene.emit(builtin::KEY_DOWN, a)?;
                Ok(())
            })
            .unwrap();
        for n in 1..=2 {
            let event = scene.event(builtin::CLICK, b).unwrap().with("n", n);
            scene.queue_event(event);
        }
        assert_eq!(scene.pump_events(), 2);
        assert_eq!(entries(&log), ["click 1", "click 2"]);
        assert_eq!(scene.pending_events(), 2, "events queued while pumping wait");
    }

    #[test]
    fn custom_event_types_dispatch_like_builtins() {
        let (mut scene, _, b) = chain();
        let id = scene
            .register_event_type("ripple", Category::USER, "decorative ripple")
            .unwrap();
        assert!(matches!(
            scene.register_event_type("ripple", Category::USER, ""),
            Err(SceneError::EventType(_))
        ));
        scene.update_event_type(id, Some("ripple effect"), None).unwrap();
        assert_eq!(scene.event_types().get(id).unwrap().doc(), "ripple effect");

        let log = Log::default();
        scene.on(b, id, record(&log, "ripple")).unwrap();
        scene.emit("ripple", b).unwrap();
        scene.pump_events();
        assert_eq!(entries(&log), ["ripple"]);
        assert!(matches!(scene.emit("nope", b), Err(SceneError::UnknownEventType(_))));
    }

    struct Toggle;

    impl Behavior for Toggle {
        fn on_event(&mut self, event: &mut Event, _: &mut Scene) {
            event.payload_mut().set("toggled", true);
        }
    }

    fn toggle(_: &Properties) -> Result<Box<dyn Behavior>, ConfigError> {
        Ok(Box::new(Toggle))
    }

    #[test]
    fn behavior_runs_at_target_unless_default_prevented() {
        let mut scene = Scene::new();
        scene.register_type("toggle", toggle);
        let t = scene
            .create("toggle", &Properties::new().with("name", "t").with("parent", "root"))
            .unwrap();

        let event = scene.event(builtin::CLICK, &t).unwrap();
        let event = scene.dispatch_event(event).unwrap();
        assert_eq!(event.payload().get_bool("toggled").unwrap(), Some(true));

        scene
            .add_event_listener(&t, builtin::CLICK, ListenerOptions::capture(), |event, _| {
                event.prevent_default();
                Ok(())
            })
            .unwrap();
        let event = scene.event(builtin::CLICK, &t).unwrap();
        let event = scene.dispatch_event(event).unwrap();
        assert!(event.is_default_prevented());
        assert_eq!(event.payload().get_bool("toggled").unwrap(), None);
    }
}

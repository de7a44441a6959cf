// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame loop, rendering walk, hit testing and pointer input.

use kurbo::{Point, Rect, Size, Vec2};
use trellis_event_state::click::ClickResult;
use trellis_event_types::{EventTypeId, builtin};

use crate::behavior::Painter;
use crate::event::Event;
use crate::scene::Scene;
use crate::types::NodeId;

impl Scene {
    /// Advance the scene clock to `now` and run one frame's worth of work:
    /// drain the event queue, run [`update`](Self::update), then sweep orphans.
    ///
    /// Returns the number of events delivered.
    pub fn tick(&mut self, now: u64) -> usize {
        let dt = self.last_tick.map_or(0, |last| now.saturating_sub(last));
        self.now = now;
        self.last_tick = Some(now);

        let delivered = self.pump_events();
        self.update(dt);
        self.collect_garbage();
        delivered
    }

    /// Call [`on_update`](crate::Behavior::on_update) on every attached node,
    /// parents first, siblings in ascending priority.
    pub fn update(&mut self, dt: u64) {
        let walk = self.depth_first(self.root());
        self.begin_traversal();
        for id in walk {
            self.with_behavior(id, |behavior, scene| behavior.on_update(id, dt, scene));
        }
        self.end_traversal();
    }

    /// Draw every visible attached node through `painter`.
    ///
    /// Parents are drawn before their children and siblings in ascending
    /// priority, so the painter's later calls belong on top. Invisible nodes
    /// hide their whole subtree. Drawn nodes are no longer dirty afterwards.
    ///
    /// Returns the number of nodes drawn.
    pub fn render(&mut self, painter: &mut dyn Painter) -> usize {
        let visible = self.visible_nodes();
        self.begin_traversal();
        for &(id, world) in &visible {
            let Some(node) = self.node(id) else {
                continue;
            };
            if let Some(behavior) = &node.behavior {
                behavior.on_render(node, world, painter);
            }
        }
        for &(id, _) in &visible {
            if let Some(node) = self.node_mut(id) {
                node.dirty = false;
            }
        }
        self.end_traversal();
        visible.len()
    }

    /// [`tick`](Self::tick) followed by [`render`](Self::render).
    pub fn frame(&mut self, now: u64, painter: &mut dyn Painter) -> usize {
        self.tick(now);
        self.render(painter)
    }

    /// The topmost visible, enabled, clickable node containing `point`
    /// (in root coordinates).
    ///
    /// Children are tested before their parent, higher priority first.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.hit(self.root(), point, Vec2::ZERO)
    }

    /// Feed a pointer motion.
    ///
    /// During a press, moving further than the drag threshold queues
    /// `drag_start` at the pressed node, and every later motion a metered
    /// `drag`. At most once per hover interval the pointer is hit tested, the
    /// hover slot updated and a metered `mouse_move` queued at the hovered node.
    pub fn pointer_moved(&mut self, point: Point) {
        if let Some(source) = self.clicks.on_move(point) {
            log::trace!("drag started on `{}`", self.describe(source));
            self.queue_pointer(builtin::DRAG_START, source, point);
        }
        if let Some(press) = self.clicks.press()
            && press.distance_exceeded
        {
            let source = press.target;
            self.queue_pointer(builtin::DRAG, source, point);
        }

        if !self.hover_throttle.ready(self.now) {
            return;
        }
        let hit = self.hit_test(point);
        self.hover(hit);
        if let Some(target) = hit {
            self.queue_pointer(builtin::MOUSE_MOVE, target, point);
        }
    }

    /// Feed a pointer button press (`down`) or release.
    ///
    /// A press queues `mouse_down` at the hit node and moves keyboard focus to
    /// it when it is tab-enabled. A release queues `mouse_up`, then `drag_end`
    /// and `drop` if the press turned into a drag, then `click` (and
    /// `double_click` for a second click) when the press and release make one.
    ///
    /// Returns the hit node.
    pub fn pointer_button(&mut self, point: Point, down: bool) -> Option<NodeId> {
        let hit = self.hit_test(point);
        if down {
            let target = hit?;
            self.queue_pointer(builtin::MOUSE_DOWN, target, point);
            self.clicks.on_down(target, point, self.now);
            if self.node(target).is_some_and(|n| n.is_tab_enabled()) {
                // Disabled nodes are never hit, so this cannot be refused.
                let _ = self.set_keyboard_focus(target);
            }
            return hit;
        }

        let dragged = self
            .clicks
            .press()
            .filter(|p| p.distance_exceeded)
            .map(|p| p.target);
        if let Some(target) = hit {
            self.queue_pointer(builtin::MOUSE_UP, target, point);
        }
        if let Some(source) = dragged {
            self.queue_pointer(builtin::DRAG_END, source, point);
            if let Some(target) = hit
                && let Some(ty) = self.event_types.find_by_name(builtin::DROP)
            {
                let event = Self::pointer_event(ty, target, point).with_related(source);
                self.queue_event(event);
            }
        }

        let Some(target) = hit else {
            self.clicks.cancel();
            return None;
        };
        if let ClickResult::Click { target, count } = self.clicks.on_up(&target, point, self.now) {
            if let Some(ty) = self.event_types.find_by_name(builtin::CLICK) {
                self.queue_event(Self::pointer_event(ty, target, point).with("count", count));
            }
            if count == 2 {
                self.queue_pointer(builtin::DOUBLE_CLICK, target, point);
            }
        }
        hit
    }

    /// Resize the root to the new window size and queue `window_resize` at it.
    pub fn window_resized(&mut self, size: Size) {
        let root = self.root();
        // The root is always live.
        let _ = self.set_size(root, size);
        if let Some(ty) = self.event_types.find_by_name(builtin::WINDOW_RESIZE) {
            let event = Event::new(ty, root)
                .with("width", size.width)
                .with("height", size.height);
            self.queue_event(event);
        }
    }

    // --- internals ---

    fn hit(&self, id: NodeId, point: Point, origin: Vec2) -> Option<NodeId> {
        let n = self.node(id)?;
        if !n.is_visible() {
            return None;
        }
        let inner = origin + n.position.to_vec2();
        if let Some(hit) = n
            .children
            .iter()
            .rev()
            .find_map(|&c| self.hit(c, point, inner))
        {
            return Some(hit);
        }
        (n.is_enabled() && n.is_clickable() && (n.rect() + origin).contains(point)).then_some(id)
    }

    /// Visible attached nodes in draw order, with their world rectangles.
    fn visible_nodes(&self) -> Vec<(NodeId, Rect)> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root(), Vec2::ZERO)];
        while let Some((id, origin)) = stack.pop() {
            let Some(n) = self.node(id) else {
                continue;
            };
            if !n.is_visible() {
                continue;
            }
            out.push((id, n.rect() + origin));
            let inner = origin + n.position.to_vec2();
            stack.extend(n.children.iter().rev().map(|&c| (c, inner)));
        }
        out
    }

    fn pointer_event(ty: EventTypeId, target: NodeId, point: Point) -> Event {
        Event::new(ty, target).with("x", point.x).with("y", point.y)
    }

    fn queue_pointer(&mut self, name: &str, target: NodeId, point: Point) -> bool {
        match self.event_types.find_by_name(name) {
            Some(ty) => self.queue_event(Self::pointer_event(ty, target, point)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::error::ConfigError;
    use crate::node::Node;
    use crate::value::Properties;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn boxed(name: &str, parent: &str, rect: (i32, i32, i32, i32)) -> Properties {
        Properties::new()
            .with("name", name)
            .with("parent", parent)
            .with("x", rect.0)
            .with("y", rect.1)
            .with("width", rect.2)
            .with("height", rect.3)
    }

    fn create(scene: &mut Scene, props: Properties) -> NodeId {
        scene.create("node", &props).unwrap().resolve(scene).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        drawn: Vec<(String, Rect)>,
    }

    impl Painter for Recorder {
        fn draw(&mut self, node: &Node, world: Rect) {
            self.drawn.push((node.name().to_owned(), world));
        }
    }

    impl Recorder {
        fn names(&self) -> Vec<&str> {
            self.drawn.iter().map(|(n, _)| n.as_str()).collect()
        }
    }

    #[test]
    fn render_walks_visible_nodes_in_priority_order() {
        let mut scene = Scene::new();
        create(&mut scene, boxed("top", "root", (10, 10, 50, 50)).with("priority", 2));
        create(&mut scene, boxed("bottom", "root", (0, 0, 100, 100)).with("priority", 1));
        create(&mut scene, boxed("label", "top", (5, 5, 10, 10)));
        create(&mut scene, boxed("hidden", "root", (0, 0, 10, 10)).with("visible", false));
        create(&mut scene, boxed("inside_hidden", "hidden", (0, 0, 10, 10)));
        create(&mut scene, boxed("orphan", "root", (0, 0, 10, 10)).with("orphan_policy", "retain"));
        scene.remove_child("root", "orphan").unwrap();

        let mut painter = Recorder::default();
        assert_eq!(scene.render(&mut painter), 4);
        assert_eq!(painter.names(), ["root", "bottom", "top", "label"]);
        assert_eq!(painter.drawn[3].1, Rect::new(15.0, 15.0, 25.0, 25.0));
        assert!(!scene.get("label").unwrap().is_dirty());
        assert!(scene.get("hidden").unwrap().is_dirty(), "skipped nodes stay dirty");
    }

    thread_local! {
        static UPDATES: RefCell<Vec<(String, u64)>> = const { RefCell::new(Vec::new()) };
    }

    struct Ticker;

    impl Behavior for Ticker {
        fn on_update(&mut self, node: NodeId, dt: u64, scene: &mut Scene) {
            let name = scene.get(node).map(|n| n.name().to_owned()).unwrap_or_default();
            UPDATES.with(|u| u.borrow_mut().push((name, dt)));
            // Structural changes from updates wait for the walk.
            scene.destroy(node).unwrap();
            assert!(scene.is_alive(node));
        }
    }

    fn ticker(_: &Properties) -> Result<Box<dyn Behavior>, ConfigError> {
        Ok(Box::new(Ticker))
    }

    #[test]
    fn tick_pumps_updates_and_collects() {
        UPDATES.with(|u| u.borrow_mut().clear());
        let mut scene = Scene::new();
        scene.register_type("ticker", ticker);
        scene
            .create("ticker", &Properties::new().with("name", "t").with("parent", "root"))
            .unwrap();
        let late = create(
            &mut scene,
            Properties::new()
                .with("name", "late")
                .with("parent", "root")
                .with("orphan_policy", "grace")
                .with("orphan_grace", 10),
        );
        scene.remove_child("root", late).unwrap();

        let clicks = Rc::new(RefCell::new(0));
        let seen = clicks.clone();
        scene
            .on("root", builtin::CLICK, move |_, _| {
                *seen.borrow_mut() += 1;
                Ok(())
            })
            .unwrap();
        scene.emit(builtin::CLICK, "root").unwrap();

        assert_eq!(scene.tick(100), 1);
        assert_eq!(*clicks.borrow(), 1);
        assert_eq!(scene.now(), 100);
        assert_eq!(UPDATES.with(|u| u.borrow().clone()), [("t".to_owned(), 0)]);
        assert!(!scene.contains("t"), "destroyed after the update walk");
        assert!(!scene.is_alive(late), "swept at the end of the tick");
    }

    #[test]
    fn update_reports_elapsed_time() {
        UPDATES.with(|u| u.borrow_mut().clear());
        let mut scene = Scene::new();
        scene.register_type("ticker", ticker);
        scene.tick(5);
        scene
            .create("ticker", &Properties::new().with("name", "t").with("parent", "root"))
            .unwrap();
        scene.tick(21);
        assert_eq!(UPDATES.with(|u| u.borrow().clone()), [("t".to_owned(), 16)]);
    }

    #[test]
    fn hit_test_prefers_topmost_clickable() {
        let mut scene = Scene::new();
        let back = create(&mut scene, boxed("back", "root", (0, 0, 100, 100)).with("priority", 1));
        let front = create(&mut scene, boxed("front", "root", (50, 50, 100, 100)).with("priority", 2));
        create(
            &mut scene,
            boxed("deco", "root", (0, 0, 20, 20))
                .with("priority", 3)
                .with("clickable", false),
        );
        let child = create(&mut scene, boxed("child", "back", (10, 10, 10, 10)));

        assert_eq!(scene.hit_test(Point::new(60.0, 60.0)), Some(front));
        assert_eq!(scene.hit_test(Point::new(15.0, 15.0)), Some(child));
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0)), Some(back), "deco is not clickable");
        assert_eq!(scene.hit_test(Point::new(500.0, 500.0)), Some(scene.root()));
        assert_eq!(scene.hit_test(Point::new(900.0, 10.0)), None);

        scene.set_visible(front, false).unwrap();
        assert_eq!(scene.hit_test(Point::new(60.0, 60.0)), Some(back));
        scene.set_enabled(back, false).unwrap();
        assert_eq!(scene.hit_test(Point::new(60.0, 60.0)), Some(scene.root()));
    }

    type Log = Rc<RefCell<Vec<String>>>;

    const POINTER_EVENTS: [&str; 9] = [
        builtin::MOUSE_DOWN,
        builtin::MOUSE_UP,
        builtin::CLICK,
        builtin::DOUBLE_CLICK,
        builtin::DRAG_START,
        builtin::DRAG,
        builtin::DRAG_END,
        builtin::DROP,
        builtin::MOUSE_MOVE,
    ];

    fn watch_pointer(scene: &mut Scene) -> Log {
        let log = Log::default();
        for kind in POINTER_EVENTS {
            let log = log.clone();
            scene
                .on("root", kind, move |event, scene| {
                    let ty = scene.type_label(event.event_type());
                    let target = scene.describe(event.target());
                    log.borrow_mut().push(format!("{ty} {target}"));
                    Ok(())
                })
                .unwrap();
        }
        log
    }

    fn button_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let button = create(&mut scene, boxed("button", "root", (10, 10, 50, 20)));
        (scene, button)
    }

    #[test]
    fn press_and_release_make_clicks_and_double_clicks() {
        let (mut scene, button) = button_scene();
        let log = watch_pointer(&mut scene);
        let p = Point::new(20.0, 20.0);

        for (t, down) in [(0, true), (50, false), (200, true), (250, false)] {
            scene.set_time(t);
            assert_eq!(scene.pointer_button(p, down), Some(button));
        }
        scene.pump_events();
        assert_eq!(
            *log.borrow(),
            [
                "mouse_down button",
                "mouse_up button",
                "click button",
                "mouse_down button",
                "mouse_up button",
                "click button",
                "double_click button",
            ]
        );
        assert_eq!(scene.keyboard_focus(), None, "button is not tab-enabled");
    }

    #[test]
    fn click_payload_carries_position_and_count() {
        let (mut scene, button) = button_scene();
        let counts = Rc::new(RefCell::new(Vec::new()));
        let seen = counts.clone();
        scene
            .on(button, builtin::CLICK, move |event, _| {
                let p = event.payload();
                seen.borrow_mut()
                    .push((p.get_float("x")?, p.get_int("count")?));
                Ok(())
            })
            .unwrap();
        scene.pointer_button(Point::new(12.0, 15.0), true);
        scene.pointer_button(Point::new(12.0, 15.0), false);
        scene.pump_events();
        assert_eq!(*counts.borrow(), [(Some(12.0), Some(1))]);
    }

    #[test]
    fn dragging_off_a_node_drops_instead_of_clicking() {
        let (mut scene, button) = button_scene();
        let log = watch_pointer(&mut scene);

        scene.pointer_button(Point::new(20.0, 20.0), true);
        scene.set_time(10);
        scene.pointer_moved(Point::new(40.0, 20.0));
        assert_eq!(scene.mouse_hovered(), Some(button));
        scene.set_time(20);
        assert_eq!(scene.pointer_button(Point::new(300.0, 300.0), false), Some(scene.root()));
        scene.pump_events();

        assert_eq!(
            *log.borrow(),
            [
                "mouse_down button",
                "drag_start button",
                "drag button",
                "mouse_move button",
                "mouse_up root",
                "drag_end button",
                "drop root",
            ]
        );
    }

    #[test]
    fn pointer_motion_updates_hover_at_the_hover_rate() {
        let (mut scene, button) = button_scene();
        let log = watch_pointer(&mut scene);

        scene.set_time(0);
        scene.pointer_moved(Point::new(20.0, 20.0));
        assert_eq!(scene.mouse_hovered(), Some(button));

        scene.set_time(4);
        scene.pointer_moved(Point::new(200.0, 200.0));
        assert_eq!(scene.mouse_hovered(), Some(button), "inside the hover interval");

        scene.set_time(8);
        scene.pointer_moved(Point::new(200.0, 200.0));
        assert_eq!(scene.mouse_hovered(), Some(scene.root()));

        scene.pump_events();
        assert_eq!(*log.borrow(), ["mouse_move button", "mouse_move root"]);
    }

    #[test]
    fn mouse_down_focuses_tab_enabled_nodes() {
        let mut scene = Scene::new();
        let field = create(&mut scene, boxed("field", "root", (0, 0, 40, 10)).with("tab_enabled", true));
        scene.pointer_button(Point::new(5.0, 5.0), true);
        assert_eq!(scene.keyboard_focus(), Some(field));
    }

    #[test]
    fn window_resize_relays_out_from_the_root() {
        let mut scene = Scene::new();
        let bar = create(
            &mut scene,
            boxed("status_bar", "root", (0, 580, 800, 20))
                .with("anchor_right", true)
                .with("anchor_top", false)
                .with("anchor_bottom", false),
        );
        let log = Log::default();
        let sizes = log.clone();
        scene
            .on("root", builtin::WINDOW_RESIZE, move |event, _| {
                let w = event.payload().get_float("width")?.unwrap_or_default();
                sizes.borrow_mut().push(format!("{w}"));
                Ok(())
            })
            .unwrap();

        scene.window_resized(Size::new(1000.0, 700.0));
        assert_eq!(scene.get("root").unwrap().size(), Size::new(1000.0, 700.0));
        assert_eq!(
            scene.get(bar).unwrap().rect(),
            Rect::new(0.0, 630.0, 1000.0, 650.0),
            "stretches horizontally, centred vertically"
        );
        scene.pump_events();
        assert_eq!(*log.borrow(), ["1000"]);
    }

    #[test]
    fn frame_ticks_then_renders() {
        let mut scene = Scene::new();
        create(&mut scene, boxed("a", "root", (0, 0, 10, 10)));
        let mut painter = Recorder::default();
        assert_eq!(scene.frame(16, &mut painter), 2);
        assert_eq!(scene.now(), 16);
        assert_eq!(painter.names(), ["root", "a"]);
    }
}

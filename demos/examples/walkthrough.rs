// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tour of `trellis_scene`: building a tree, routing pointer input through
//! listeners, tab focus, orphan collection and drawing.
//!
//! Run:
//! - `cargo run -p trellis_demos --example walkthrough`
//! - `RUST_LOG=debug cargo run -p trellis_demos --example walkthrough` to also see
//!   the scene's own diagnostics.

use kurbo::{Point, Rect, Size};
use trellis_scene::{
    Behavior, ConfigError, Event, ListenerOptions, Node, Painter, Properties, Scene, builtin,
};

/// A clickable node that counts its own clicks.
#[derive(Debug, Default)]
struct Button {
    clicks: u32,
}

impl Behavior for Button {
    fn on_event(&mut self, event: &mut Event, scene: &mut Scene) {
        if scene.event_types().name_of(event.event_type()) == Some(builtin::CLICK) {
            self.clicks += 1;
            let name = scene.get(event.target()).map(Node::name).unwrap_or("?");
            log::info!("  `{name}` default action, {} click(s) so far", self.clicks);
        }
    }
}

fn button(_: &Properties) -> Result<Box<dyn Behavior>, ConfigError> {
    Ok(Box::new(Button::default()))
}

/// Logs each draw call instead of rasterizing.
struct TextPainter;

impl Painter for TextPainter {
    fn draw(&mut self, node: &Node, world: Rect) {
        log::info!(
            "  draw {:<8} at ({}, {}) {}x{}",
            node.name(),
            world.x0,
            world.y0,
            world.width(),
            world.height()
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut scene = Scene::new();
    scene.register_type("button", button);
    scene.window_resized(Size::new(320.0, 240.0));

    let rect = |name: &str, parent: &str, x: f64, y: f64, w: f64, h: f64| {
        Properties::new()
            .with("name", name)
            .with("parent", parent)
            .with("x", x)
            .with("y", y)
            .with("width", w)
            .with("height", h)
    };

    let dialog = scene
        .create("node", &rect("dialog", "root", 40.0, 40.0, 240.0, 160.0))
        .expect("dialog");
    let ok = scene
        .create(
            "button",
            &rect("ok", "dialog", 20.0, 110.0, 80.0, 30.0)
                .with("tab_enabled", true)
                .with("tab_priority", 1),
        )
        .expect("ok button");
    scene
        .create(
            "button",
            &rect("cancel", "dialog", 140.0, 110.0, 80.0, 30.0)
                .with("tab_enabled", true)
                .with("tab_priority", 2),
        )
        .expect("cancel button");

    log::info!("tree:\n{}", scene.print_tree());

    // The dialog sees every click inside it twice: once on the way down and
    // once on the way back up.
    for (label, options) in [
        ("capture", ListenerOptions::capture()),
        ("bubble", ListenerOptions::default()),
    ] {
        scene
            .add_event_listener(&dialog, builtin::CLICK, options, move |event, scene| {
                let target = scene.get(event.target()).map(Node::name).unwrap_or("?");
                log::info!("  dialog {label}: click on `{target}`");
                Ok(())
            })
            .expect("dialog listener");
    }
    // A high-priority listener on the button runs before the default one.
    scene
        .add_event_listener(
            &ok,
            builtin::CLICK,
            ListenerOptions::default().with_priority(10),
            |event, _| {
                let count = event.payload().get("count").cloned();
                log::info!("  ok listener: count {count:?}");
                Ok(())
            },
        )
        .expect("ok listener");

    log::info!("pointer click on `ok`:");
    let mut now = 0;
    let inside_ok = Point::new(80.0, 165.0);
    scene.pointer_moved(inside_ok);
    scene.pointer_button(inside_ok, true);
    scene.pointer_button(inside_ok, false);
    now += 16;
    scene.tick(now);
    log::info!("keyboard focus: {:?}", scene.keyboard_focused_handle());

    log::info!("tab forward:");
    for _ in 0..3 {
        let next = scene.do_tab_forward().and_then(|id| scene.handle_of(id));
        log::info!("  focus -> {next:?}");
    }

    log::info!("closing the dialog with a 100ms grace period:");
    scene
        .set_orphan_retention_policy(&dialog, trellis_scene::RetentionPolicy::Grace)
        .expect("policy");
    scene.set_orphan_grace(&dialog, 100).expect("grace");
    scene.remove_from_parent(&dialog).expect("detach");
    log::info!("  orphans: {}", scene.count_orphaned_nodes());
    for _ in 0..8 {
        now += 16;
        scene.tick(now);
    }
    log::info!(
        "  after {now}ms: orphans {}, dialog alive: {}",
        scene.count_orphaned_nodes(),
        dialog.is_valid(&scene)
    );

    log::info!("render:");
    let drawn = scene.render(&mut TextPainter);
    log::info!("  {drawn} node(s) drawn");
}

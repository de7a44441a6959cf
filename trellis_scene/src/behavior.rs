// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-type node behavior and the drawing seam.

use kurbo::Rect;

use crate::error::ConfigError;
use crate::event::Event;
use crate::node::Node;
use crate::scene::Scene;
use crate::types::NodeId;
use crate::value::Properties;

/// Behavior attached to a node by its type's factory.
///
/// Every hook has a default, so a type only implements what it needs.
///
/// While a hook runs, the behavior is detached from its node. Structural
/// mutations requested from `on_event` and `on_update` are deferred until the
/// surrounding walk completes.
pub trait Behavior {
    /// Called once, right after the node has been created (and attached, if its
    /// config named a parent).
    fn on_init(&mut self, node: NodeId, scene: &mut Scene) {
        let _ = (node, scene);
    }

    /// Called in the target phase, after the node's listeners, unless a
    /// listener stopped immediate propagation or prevented the default.
    fn on_event(&mut self, event: &mut Event, scene: &mut Scene) {
        let _ = (event, scene);
    }

    /// Called once per frame with the milliseconds elapsed since the last frame.
    fn on_update(&mut self, node: NodeId, dt: u64, scene: &mut Scene) {
        let _ = (node, dt, scene);
    }

    /// Draw the node. `world` is its rectangle in root coordinates.
    fn on_render(&self, node: &Node, world: Rect, painter: &mut dyn Painter) {
        painter.draw(node, world);
    }
}

/// Receives draw calls during [`Scene::render`].
///
/// Nodes are visited parents first and siblings in ascending priority, so
/// later calls paint over earlier ones.
pub trait Painter {
    /// Draw `node` at `world`.
    fn draw(&mut self, node: &Node, world: Rect);
}

/// Behavior of the built-in `"node"` type: a plain container.
#[derive(Copy, Clone, Debug, Default)]
pub struct Container;

impl Behavior for Container {}

/// Constructor of a node type's behavior from its creation config.
pub type Factory = fn(&Properties) -> Result<Box<dyn Behavior>, ConfigError>;

pub(crate) fn container(_: &Properties) -> Result<Box<dyn Behavior>, ConfigError> {
    Ok(Box::new(Container))
}

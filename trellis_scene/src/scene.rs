// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene: node registry and arena.

use std::collections::VecDeque;
use std::fmt;

use hashbrown::HashMap;
use trellis_event_state::click::ClickState;
use trellis_event_state::meter::{Meter, Throttle};
use trellis_event_types::{EventTypeId, EventTypeRegistry, builtin};
use trellis_responder::listeners::ListenerTable;

use crate::behavior::{Behavior, Container, Factory, container};
use crate::config::{NodeConfig, SceneConfig};
use crate::deferred::Command;
use crate::error::{ListenerError, SceneError};
use crate::event::Event;
use crate::handle::{AsNode, Handle};
use crate::node::Node;
use crate::types::{NodeId, RetentionPolicy};
use crate::value::Properties;

/// Name of the root node every scene starts with.
pub const ROOT_NAME: &str = "root";

/// Type name of the built-in container type.
pub const CONTAINER_TYPE: &str = "node";

pub(crate) type Listener = Box<dyn FnMut(&mut Event, &mut Scene) -> Result<(), ListenerError>>;

/// A retained tree of nodes with its event machinery.
///
/// The scene is the only owner of its nodes. Callers refer to nodes through
/// [`NodeId`]s, [`Handle`]s or plain names (anything implementing [`AsNode`]).
///
/// ## Example
///
/// ```rust
/// use trellis_scene::{Properties, Scene};
///
/// let mut scene = Scene::new();
/// let panel = scene
///     .create("node", &Properties::new().with("name", "panel").with("priority", 10))
///     .unwrap();
/// let badge = scene
///     .create("node", &Properties::new().with("name", "badge").with("priority", 5))
///     .unwrap();
///
/// scene.add_child("root", &panel).unwrap();
/// scene.add_child("root", &badge).unwrap();
/// assert_eq!(scene.get_children_priorities("root"), [5, 10]);
///
/// scene.move_to_top(&badge).unwrap();
/// assert_eq!(scene.get_children_priorities("root"), [10, 11]);
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    names: HashMap<String, NodeId>,
    types: HashMap<String, Factory>,
    root: NodeId,
    auto_names: u64,
    pub(crate) config: SceneConfig,
    pub(crate) now: u64,
    pub(crate) last_tick: Option<u64>,
    pub(crate) event_types: EventTypeRegistry,
    pub(crate) listeners: ListenerTable<NodeId, EventTypeId, Listener>,
    pub(crate) queue: VecDeque<Event>,
    pub(crate) meter: Meter<NodeId, EventTypeId>,
    pub(crate) hover_throttle: Throttle,
    pub(crate) clicks: ClickState<NodeId>,
    pub(crate) focused: Option<NodeId>,
    pub(crate) hovered: Option<NodeId>,
    pub(crate) traversal_depth: u32,
    pub(crate) pending: Vec<Command>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("now", &self.now)
            .field("listeners", &self.listeners)
            .field("queued_events", &self.queue.len())
            .field("focused", &self.focused)
            .field("hovered", &self.hovered)
            .field("traversal_depth", &self.traversal_depth)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene with default tunables, the built-in event types and a root node.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a scene with the given tunables.
    pub fn with_config(config: SceneConfig) -> Self {
        let root = NodeId::new(0, 1);
        let root_config = NodeConfig {
            size: config.root_size,
            ..NodeConfig::default()
        };
        let root_node = Node::new(
            root.generation(),
            ROOT_NAME.to_owned(),
            CONTAINER_TYPE.to_owned(),
            &root_config,
            RetentionPolicy::Retain,
            config.orphan_grace,
            Box::new(Container),
        );

        let mut names = HashMap::new();
        names.insert(ROOT_NAME.to_owned(), root);
        let mut types: HashMap<String, Factory> = HashMap::new();
        types.insert(CONTAINER_TYPE.to_owned(), container);

        let event_types = EventTypeRegistry::with_builtins();
        let mut meter = Meter::new();
        for name in [builtin::MOUSE_MOVE, builtin::DRAG] {
            if let Some(ty) = event_types.find_by_name(name) {
                meter.set_interval(ty, config.motion_interval);
            }
        }

        Self {
            nodes: vec![Some(root_node)],
            generations: vec![root.generation()],
            free_list: Vec::new(),
            names,
            types,
            root,
            auto_names: 0,
            hover_throttle: Throttle::new(config.hover_interval),
            config,
            now: 0,
            last_tick: None,
            event_types,
            listeners: ListenerTable::new(),
            queue: VecDeque::new(),
            meter,
            clicks: ClickState::new(),
            focused: None,
            hovered: None,
            traversal_depth: 0,
            pending: Vec::new(),
        }
    }

    /// Scene-wide tunables.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current scene time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Set the scene clock without running a frame.
    pub fn set_time(&mut self, now: u64) {
        self.now = now;
    }

    /// Register (or replace) the factory for `type_name`.
    ///
    /// Returns the factory previously registered under that name.
    pub fn register_type(&mut self, type_name: &str, factory: Factory) -> Option<Factory> {
        self.types.insert(type_name.to_owned(), factory)
    }

    /// Whether a factory is registered for `type_name`.
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Create a node of `type_name` configured by `props`.
    ///
    /// The recognised keys are described on [`NodeConfig`]; everything in
    /// `props` is also handed to the type's factory. When `parent` names a node
    /// the new node is attached to it, and the behavior's
    /// [`on_init`](Behavior::on_init) runs last.
    pub fn create(&mut self, type_name: &str, props: &Properties) -> Result<Handle, SceneError> {
        let factory = *self
            .types
            .get(type_name)
            .ok_or_else(|| SceneError::UnknownType(type_name.to_owned()))?;
        let config_error = |source| SceneError::Config {
            type_name: type_name.to_owned(),
            source,
        };
        let config = NodeConfig::from_properties(props).map_err(config_error)?;

        let name = match &config.name {
            Some(name) => name.clone(),
            None => self.auto_name(type_name),
        };
        if self.names.contains_key(&name) {
            return Err(SceneError::DuplicateName(name));
        }
        let parent = config
            .parent
            .as_deref()
            .map(|p| self.lookup(p).ok_or(p))
            .transpose()
            .map_err(|p| {
                config_error(crate::error::ConfigError::InvalidValue {
                    key: "parent".into(),
                    reason: format!("no node named `{p}`"),
                })
            })?;
        let behavior = factory(props).map_err(config_error)?;

        let retention = config.orphan_policy.unwrap_or(self.config.orphan_policy);
        let grace = config.orphan_grace.unwrap_or(self.config.orphan_grace);
        let id = self.insert(Node::new(
            0,
            name.clone(),
            type_name.to_owned(),
            &config,
            retention,
            grace,
            behavior,
        ));
        log::debug!("created `{name}` ({type_name}) as {id}");

        if let Some(parent) = parent {
            self.add_child(parent, id)?;
        }
        self.with_behavior(id, |behavior, scene| behavior.on_init(id, scene));
        Ok(Handle::new(name, type_name))
    }

    /// Destroy a node.
    ///
    /// The node is detached and freed; its children follow their own retention
    /// policy: auto-destroy children are destroyed with it, the others become
    /// orphans. During a dispatch or render walk the destruction is deferred
    /// until the walk completes.
    pub fn destroy(&mut self, node: impl AsNode) -> Result<(), SceneError> {
        let id = self.require(node)?;
        if id == self.root {
            return Err(SceneError::RootNode("destroyed"));
        }
        if self.is_traversing() {
            log::debug!("deferring destruction of `{}` until the walk completes", self.describe(id));
            self.defer(Command::Destroy(id));
            return Ok(());
        }
        self.destroy_now(id);
        Ok(())
    }

    /// Look a node up by name.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Resolve any node reference to a live [`NodeId`].
    pub fn resolve(&self, node: impl AsNode) -> Option<NodeId> {
        node.resolve_in(self)
    }

    /// Borrow a node.
    pub fn get(&self, node: impl AsNode) -> Option<&Node> {
        self.node(node.resolve_in(self)?)
    }

    /// Whether a node named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Give a node a new unique name.
    ///
    /// Handles holding the old name stop resolving.
    pub fn rename(&mut self, node: impl AsNode, new_name: &str) -> Result<(), SceneError> {
        let id = self.require(node)?;
        if id == self.root {
            return Err(SceneError::RootNode("renamed"));
        }
        if new_name.is_empty() {
            return Err(SceneError::EmptyName);
        }
        match self.names.get(new_name) {
            Some(&other) if other == id => return Ok(()),
            Some(_) => return Err(SceneError::DuplicateName(new_name.to_owned())),
            None => {}
        }
        let node = self.node_mut(id).ok_or(SceneError::StaleHandle)?;
        let old = std::mem::replace(&mut node.name, new_name.to_owned());
        self.names.remove(&old);
        self.names.insert(new_name.to_owned(), id);
        Ok(())
    }

    /// A handle to a live node.
    pub fn handle_of(&self, node: impl AsNode) -> Option<Handle> {
        let node = self.get(node)?;
        Some(Handle::new(node.name.clone(), node.type_name.clone()))
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no live nodes. The root keeps this false.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Whether the node is connected to the root.
    pub fn is_attached(&self, node: impl AsNode) -> bool {
        let Some(mut cur) = node.resolve_in(self) else {
            return false;
        };
        loop {
            if cur == self.root {
                return true;
            }
            match self.node(cur).and_then(|n| n.parent) {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    // --- internals ---

    pub(crate) fn require(&self, node: impl AsNode) -> Result<NodeId, SceneError> {
        node.resolve_in(self).ok_or(SceneError::StaleHandle)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Ids of all live nodes, in slot order.
    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(idx, n)| {
            let n = n.as_ref()?;
            Some(NodeId::new(u32::try_from(idx).ok()?, n.generation))
        })
    }

    /// Name of a node for log lines.
    pub(crate) fn describe(&self, id: NodeId) -> String {
        match self.node(id) {
            Some(n) => n.name.clone(),
            None => format!("<stale {id}>"),
        }
    }

    /// Run `f` with the node's behavior detached from it.
    pub(crate) fn with_behavior(&mut self, id: NodeId, f: impl FnOnce(&mut dyn Behavior, &mut Self)) {
        let Some(mut behavior) = self.node_mut(id).and_then(|n| n.behavior.take()) else {
            return;
        };
        f(behavior.as_mut(), self);
        if let Some(n) = self.node_mut(id)
            && n.behavior.is_none()
        {
            n.behavior = Some(behavior);
        }
    }

    fn insert(&mut self, mut node: Node) -> NodeId {
        let name = node.name.clone();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            // Only slots whose generation can still advance are on the free list.
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            node.generation = generation;
            self.nodes[idx] = Some(node);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            node.generation = generation;
            self.nodes.push(Some(node));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        self.names.insert(name, id);
        id
    }

    fn auto_name(&mut self, type_name: &str) -> String {
        loop {
            self.auto_names += 1;
            let name = format!("{type_name}#{}", self.auto_names);
            if !self.names.contains_key(&name) {
                return name;
            }
        }
    }

    /// Destroy `id` right away. Returns how many nodes were freed.
    pub(crate) fn destroy_now(&mut self, id: NodeId) -> usize {
        if !self.is_alive(id) || id == self.root {
            return 0;
        }
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            self.unlink(parent, id);
        }
        let children = self
            .node_mut(id)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();

        let mut freed = 1;
        let now = self.now;
        for child in children {
            let Some(c) = self.node_mut(child) else {
                continue;
            };
            c.parent = None;
            match c.retention {
                RetentionPolicy::AutoDestroy => {}
                RetentionPolicy::Grace => {
                    c.orphaned_at = Some(now);
                    continue;
                }
                RetentionPolicy::Retain => continue,
            }
            freed += self.destroy_now(child);
        }

        self.listeners.remove_node(&id);
        self.meter.forget_target(&id);
        self.clicks.forget_target(&id);
        if let Some(node) = self.nodes[id.idx()].take() {
            self.names.remove(&node.name);
            log::debug!("destroyed `{}` ({})", node.name, node.type_name);
        }
        // A slot whose generation is exhausted is retired so stale ids never alias.
        if self.generations[id.idx()] < u32::MAX {
            self.free_list.push(id.idx());
        }
        self.prune_slots();
        freed
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name-based node references.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::node::Node;
use crate::scene::Scene;
use crate::types::NodeId;

/// A long-lived reference to a node by name.
///
/// A handle never points into the scene's storage. Every use looks the name up
/// again, so a handle to a destroyed node simply stops resolving, and it
/// resolves to whatever node is created under the same name later.
///
/// Handles compare and hash by name only.
///
/// ```
/// use trellis_scene::{Properties, Scene};
///
/// let mut scene = Scene::new();
/// let button = scene
///     .create("node", &Properties::new().with("name", "button").with("parent", "root"))
///     .unwrap();
/// assert!(button.is_valid(&scene));
///
/// scene.destroy(&button).unwrap();
/// assert!(!button.is_valid(&scene));
/// assert_eq!(button.resolve(&scene), None);
/// ```
#[derive(Clone, Debug)]
pub struct Handle {
    name: String,
    type_name: String,
}

impl Handle {
    /// Create a handle for `name`. The node does not have to exist yet.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Name of the referenced node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type the node had when the handle was made.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look the node up.
    pub fn resolve(&self, scene: &Scene) -> Option<NodeId> {
        scene.lookup(&self.name)
    }

    /// Whether a node of this name currently exists.
    pub fn is_valid(&self, scene: &Scene) -> bool {
        self.resolve(scene).is_some()
    }

    /// Borrow the node.
    pub fn get<'a>(&self, scene: &'a Scene) -> Option<&'a Node> {
        scene.get(self)
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.name)
    }
}

/// Anything that can name a node: a [`NodeId`], a [`Handle`] or a node name.
pub trait AsNode {
    /// Resolve to a live node of `scene`.
    fn resolve_in(&self, scene: &Scene) -> Option<NodeId>;
}

impl AsNode for NodeId {
    fn resolve_in(&self, scene: &Scene) -> Option<NodeId> {
        scene.is_alive(*self).then_some(*self)
    }
}

impl AsNode for Handle {
    fn resolve_in(&self, scene: &Scene) -> Option<NodeId> {
        self.resolve(scene)
    }
}

impl AsNode for str {
    fn resolve_in(&self, scene: &Scene) -> Option<NodeId> {
        scene.lookup(self)
    }
}

impl AsNode for String {
    fn resolve_in(&self, scene: &Scene) -> Option<NodeId> {
        scene.lookup(self)
    }
}

impl<T: AsNode + ?Sized> AsNode for &T {
    fn resolve_in(&self, scene: &Scene) -> Option<NodeId> {
        (**self).resolve_in(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn equality_and_hash_ignore_type() {
        let a = Handle::new("ok", "button");
        let b = Handle::new("ok", "node");
        assert_eq!(a, b);
        let set: HashSet<Handle> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(Handle::new("ok", "node"), Handle::new("cancel", "node"));
    }

    #[test]
    fn display_shows_type_and_name() {
        assert_eq!(Handle::new("ok", "button").to_string(), "button:ok");
    }
}

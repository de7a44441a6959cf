// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event type catalog.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::builtin;
use crate::error::EventTypeError;
use crate::types::{Category, EventTypeDescriptor, EventTypeId, INDEX_MASK};

/// Opaque position in a paging walk over an [`EventTypeRegistry`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    /// Cursor positioned before the first descriptor.
    pub const START: Self = Self(0);
}

/// Catalog of event types keyed by unique name.
///
/// Descriptors are stored in registration order; an id's index portion is the
/// descriptor's position, so lookups by id are O(1) and ids are dense.
#[derive(Clone, Debug, Default)]
pub struct EventTypeRegistry {
    descriptors: Vec<EventTypeDescriptor>,
    by_name: HashMap<String, EventTypeId>,
}

impl EventTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every kind in [`builtin::ALL`] registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for &(name, category, doc) in builtin::ALL {
            // Built-in names are unique and far below the index limit.
            let _ = registry.register(name, category, doc);
        }
        registry
    }

    /// Register a new event type and return its freshly minted id.
    ///
    /// Registering a name twice is an error; metadata changes go through
    /// [`EventTypeRegistry::update`] so ids stay stable.
    pub fn register(
        &mut self,
        name: &str,
        category: Category,
        doc: &str,
    ) -> Result<EventTypeId, EventTypeError> {
        if name.is_empty() {
            return Err(EventTypeError::EmptyName);
        }
        if let Some(&id) = self.by_name.get(name) {
            return Err(EventTypeError::Duplicate {
                name: name.to_string(),
                id,
            });
        }
        let index = u32::try_from(self.descriptors.len()).map_err(|_| EventTypeError::Exhausted)?;
        if index > INDEX_MASK {
            return Err(EventTypeError::Exhausted);
        }
        let id = EventTypeId::from_parts(category, index);
        self.descriptors.push(EventTypeDescriptor {
            name: name.to_string(),
            id,
            category,
            doc: doc.to_string(),
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a name, registering it under `category` if unseen.
    pub fn ensure(&mut self, name: &str, category: Category) -> Result<EventTypeId, EventTypeError> {
        match self.find_by_name(name) {
            Some(id) => Ok(id),
            None => self.register(name, category, ""),
        }
    }

    /// Update documentation and/or category label of an existing type.
    ///
    /// The id is never changed.
    pub fn update(
        &mut self,
        id: EventTypeId,
        doc: Option<&str>,
        category: Option<Category>,
    ) -> Result<(), EventTypeError> {
        let descriptor = self
            .slot_mut(id)
            .ok_or(EventTypeError::UnknownId(id))?;
        if let Some(doc) = doc {
            descriptor.doc = doc.to_string();
        }
        if let Some(category) = category {
            descriptor.category = category;
        }
        Ok(())
    }

    /// Find the id registered for `name`.
    pub fn find_by_name(&self, name: &str) -> Option<EventTypeId> {
        self.by_name.get(name).copied()
    }

    /// Descriptor for `id`, if this registry minted it.
    pub fn get(&self, id: EventTypeId) -> Option<&EventTypeDescriptor> {
        self.descriptors
            .get(id.index() as usize)
            .filter(|d| d.id == id)
    }

    /// Registered name for `id`.
    pub fn name_of(&self, id: EventTypeId) -> Option<&str> {
        self.get(id).map(EventTypeDescriptor::name)
    }

    /// Return the descriptor at `cursor` and the cursor for the next call.
    ///
    /// Start with [`Cursor::START`]; `None` marks the end of the walk.
    pub fn enumerate(&self, cursor: Cursor) -> Option<(Cursor, &EventTypeDescriptor)> {
        let descriptor = self.descriptors.get(cursor.0)?;
        Some((Cursor(cursor.0 + 1), descriptor))
    }

    /// Iterate all descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventTypeDescriptor> + '_ {
        self.descriptors.iter()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn slot_mut(&mut self, id: EventTypeId) -> Option<&mut EventTypeDescriptor> {
        self.descriptors
            .get_mut(id.index() as usize)
            .filter(|d| d.id == id)
    }
}

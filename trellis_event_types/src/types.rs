// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: ids, categories, and descriptors.

use alloc::string::String;
use core::fmt;
use core::num::NonZeroU16;

/// Number of low bits in an [`EventTypeId`] that hold the registry index.
pub const INDEX_BITS: u32 = 16;

/// Mask selecting the index portion of an [`EventTypeId`].
pub const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Shift applied to the category bits of an [`EventTypeId`].
pub const CATEGORY_SHIFT: u32 = INDEX_BITS;

/// Coarse grouping of event kinds.
///
/// Categories are small non-zero codes. The associated constants cover the
/// built-in groups; any other non-zero value is a custom category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(NonZeroU16);

impl Category {
    /// Creation, initialization, and teardown of nodes.
    pub const LIFECYCLE: Self = Self::from_const(1);
    /// Pointer and keyboard input.
    pub const INPUT: Self = Self::from_const(2);
    /// Host window changes.
    pub const WINDOW: Self = Self::from_const(3);
    /// Focus, hover, enable and visibility state.
    pub const UI_STATE: Self = Self::from_const(4);
    /// Drag and drop.
    pub const DRAG_DROP: Self = Self::from_const(5);
    /// Timers.
    pub const TIMER: Self = Self::from_const(6);
    /// Clipboard.
    pub const CLIPBOARD: Self = Self::from_const(7);
    /// Frame rendering.
    pub const RENDER: Self = Self::from_const(8);
    /// Application-defined events.
    pub const USER: Self = Self::from_const(9);

    const fn from_const(code: u16) -> Self {
        match NonZeroU16::new(code) {
            Some(code) => Self(code),
            None => panic!("category codes are non-zero"),
        }
    }

    /// Create a category from its raw code; `None` for zero.
    pub const fn new(code: u16) -> Option<Self> {
        match NonZeroU16::new(code) {
            Some(code) => Some(Self(code)),
            None => None,
        }
    }

    /// Raw category code.
    pub const fn code(self) -> u16 {
        self.0.get()
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self.0.get() {
            1 => "lifecycle",
            2 => "input",
            3 => "window",
            4 => "ui-state",
            5 => "drag-drop",
            6 => "timer",
            7 => "clipboard",
            8 => "render",
            9 => "user",
            _ => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable numeric identifier of a registered event type.
///
/// Encodes the registration category in the upper bits and the registry index
/// in the lower [`INDEX_BITS`] bits. The category portion is never zero, so a
/// valid id is never zero either.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventTypeId(u32);

impl EventTypeId {
    pub(crate) const fn from_parts(category: Category, index: u32) -> Self {
        Self(((category.code() as u32) << CATEGORY_SHIFT) | (index & INDEX_MASK))
    }

    /// Raw id value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Rebuild an id from its raw value, rejecting a zero category.
    ///
    /// The result is only meaningful for the registry that minted it.
    pub fn from_raw(raw: u32) -> Option<Self> {
        u16::try_from(raw >> CATEGORY_SHIFT)
            .ok()
            .and_then(Category::new)
            .map(|_| Self(raw))
    }

    /// Registry index portion.
    pub const fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }

    /// Category the id was minted with.
    pub fn category(self) -> Category {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the category occupies the upper 16 bits of a u32."
        )]
        let code = (self.0 >> CATEGORY_SHIFT) as u16;
        Category::new(code).unwrap_or(Category::USER)
    }
}

impl fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Metadata kept for each registered event type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventTypeDescriptor {
    pub(crate) name: String,
    pub(crate) id: EventTypeId,
    pub(crate) category: Category,
    pub(crate) doc: String,
}

impl EventTypeDescriptor {
    /// Unique registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable id.
    pub fn id(&self) -> EventTypeId {
        self.id
    }

    /// Current category label. May differ from [`EventTypeId::category`]
    /// after an [`update`](crate::EventTypeRegistry::update).
    pub fn category(&self) -> Category {
        self.category
    }

    /// Free-form documentation.
    pub fn doc(&self) -> &str {
        &self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_packs_category_and_index() {
        let id = EventTypeId::from_parts(Category::TIMER, 42);
        assert_eq!(id.category(), Category::TIMER);
        assert_eq!(id.index(), 42);
        assert_eq!(EventTypeId::from_raw(id.get()), Some(id));
    }

    #[test]
    fn raw_ids_without_category_are_rejected() {
        assert_eq!(EventTypeId::from_raw(7), None);
        assert_eq!(Category::new(0), None);
    }

    #[test]
    fn unknown_codes_are_custom() {
        let c = Category::new(300).unwrap();
        assert_eq!(c.label(), "custom");
        assert_eq!(Category::DRAG_DROP.label(), "drag-drop");
    }
}

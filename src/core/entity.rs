//! Entity identification.
//!
//! Every card instance that exists in a match (in a deck, in hand, on the
//! board as a unit, in the rune field) has a unique `EntityId`. IDs are
//! allocated by the `Board` and never reused within a match.
//!
//! ```
//! use riftbound_engine::core::EntityId;
//!
//! let first = EntityId::FIRST;
//! assert_eq!(first.next(), EntityId(1001));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance or unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// First ID handed out in a match.
    pub const FIRST: EntityId = EntityId(1000);

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic `EntityId` allocator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: EntityId,
}

impl EntityAllocator {
    /// Create an allocator starting at [`EntityId::FIRST`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: EntityId::FIRST,
        }
    }

    /// Allocate a fresh ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = self.next;
        self.next = id.next();
        id
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_display() {
        assert_eq!(format!("{}", EntityId(1005)), "Entity(1005)");
        assert_eq!(EntityId(7).raw(), 7);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.alloc();
        let b = alloc.alloc();
        assert_eq!(a, EntityId::FIRST);
        assert_eq!(b, EntityId(1001));
        assert!(b > a);
    }
}

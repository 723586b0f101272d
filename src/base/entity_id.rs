//! Handles for entities stored in a logical view.

use std::fmt;

/// A stable handle to an entity inside a [`LogicalView`](crate::view::LogicalView).
///
/// `EntityId` is just a u32 index into the view's arena. Handles stay valid
/// for the lifetime of the view: entities are never removed or moved, so
/// parent links and type references can be stored as plain ids.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new EntityId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

impl From<u32> for EntityId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EntityId> for u32 {
    #[inline]
    fn from(id: EntityId) -> Self {
        id.0
    }
}

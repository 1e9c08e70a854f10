//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two handles to the same entity compare equal by `id()` even when one of them
/// has observed a later state.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether `other` denotes the same entity.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

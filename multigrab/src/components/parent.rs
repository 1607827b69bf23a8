use hecs::Entity;

/// Component added to indicate that an entity has a parent.
/// Walked by [`crate::systems::resolve_grabbable`] and used by grabbers that parent their held objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

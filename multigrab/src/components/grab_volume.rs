use hecs::Entity;

/// Tags a sensor collider as one of a grabber's grab volumes.
///
/// Overlaps reported against this entity's collider are routed to `grabber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabVolume {
    /// The grabber that owns this volume
    pub grabber: Entity,
}

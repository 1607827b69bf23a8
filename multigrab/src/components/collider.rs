use rapier3d::prelude::ColliderHandle;

/// A collider owned by this entity, possibly attached to another entity's [`super::RigidBody`].
///
/// Grab volumes are sensor colliders hanging off their grabber's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    /// Key into `PhysicsContext::colliders`
    pub handle: ColliderHandle,
}

impl Collider {
    /// Wrap a handle returned by the physics world
    pub fn new(handle: ColliderHandle) -> Collider {
        Collider { handle }
    }
}

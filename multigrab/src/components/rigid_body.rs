use rapier3d::prelude::RigidBodyHandle;

/// The body [`crate::contexts::PhysicsContext`] moves around for this entity.
///
/// Grabbers need a kinematic one to act as the gripper; grabbables need one to be carried and thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigidBody {
    /// Key into `PhysicsContext::rigid_bodies`
    pub handle: RigidBodyHandle,
}

impl RigidBody {
    /// Wrap a handle returned by the physics world
    pub fn new(handle: RigidBodyHandle) -> Self {
        Self { handle }
    }
}

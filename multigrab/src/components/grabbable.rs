use glam::Vec3;
use hecs::Entity;
use rapier3d::prelude::RigidBodyType;

/// Marks an entity as something a [`super::Grabber`] can pick up.
///
/// The entity needs a [`super::RigidBody`]: that's the body that gets carried around while the object is held.
/// Colliders on child entities (anything with a [`super::Parent`] chain leading here) count as touching this
/// grabbable.
#[derive(Debug, Clone, Default)]
pub struct Grabbable {
    /// Designated points the object prefers to be held by. The first one is used as the primary grab point.
    pub grab_points: Vec<Entity>,
    pub(crate) grabbed_by: Option<Entity>,
    pub(crate) grab_point: Option<Entity>,
    pub(crate) body_type_before_grab: Option<RigidBodyType>,
}

impl Grabbable {
    /// A grabbable with the given grab points
    pub fn with_grab_points(grab_points: Vec<Entity>) -> Self {
        Self {
            grab_points,
            ..Default::default()
        }
    }

    /// The grabber currently holding this object, if any
    pub fn grabbed_by(&self) -> Option<Entity> {
        self.grabbed_by
    }

    /// The grab point that was used when this object was picked up
    pub fn grab_point(&self) -> Option<Entity> {
        self.grab_point
    }

    /// Is anybody holding this object?
    pub fn is_grabbed(&self) -> bool {
        self.grabbed_by.is_some()
    }
}

/// Added to a grabbable while it is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grabbed {
    /// Who is holding it
    pub grabber: Entity,
    /// Which of its grab points was used
    pub grab_point: Option<Entity>,
}

/// Added to a grabbable when it is let go. Feel free to remove it once you've reacted to the throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Released {
    /// Linear velocity the object was thrown with
    pub linear_velocity: Vec3,
    /// Angular velocity the object was thrown with
    pub angular_velocity: Vec3,
}

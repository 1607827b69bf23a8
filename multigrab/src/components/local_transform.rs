use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::util::Pose;

/// The component's position relative to its [`super::Parent`].
///
/// Grabbers that parent their held objects store each object's offset from the gripper here, and
/// [`crate::components::Grabber::capture_anchor`] reads a grabber's configured offset from it.
#[derive(Clone, PartialEq, Debug, Copy, Default, Deserialize, Serialize)]
pub struct LocalTransform {
    /// The translation of the entity
    pub translation: Vec3,
    /// The rotation of the entity
    pub rotation: Quat,
}

impl LocalTransform {
    /// Convenience function to convert the `LocalTransform` into a [`Pose`]
    pub fn pose(&self) -> Pose {
        Pose::new(self.translation, self.rotation)
    }
}

impl From<Pose> for LocalTransform {
    fn from(pose: Pose) -> Self {
        LocalTransform {
            translation: pose.position,
            rotation: pose.rotation,
        }
    }
}

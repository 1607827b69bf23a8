use std::ops::Mul;

use glam::{Quat, Vec3};
use rapier3d::na;
use serde::{Deserialize, Serialize};

/// A rigid position and orientation. Scale is never part of a grab, so we don't carry it around.
///
/// Composition follows the usual "parent * child" convention: `a * b` is the pose of `b` once it has
/// been placed inside the frame described by `a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation of the pose
    pub position: Vec3,
    /// Orientation of the pose
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// No translation, no rotation
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a new pose
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A pose that only translates
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// The pose that undoes this one, such that `pose * pose.inverse()` is the identity.
    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            position: -(rotation * self.position),
            rotation,
        }
    }

    /// Move a point from this pose's local space into the space the pose is expressed in.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Express this pose in the local space of `frame`.
    ///
    /// `frame * self.relative_to(frame)` gives back `self`.
    pub fn relative_to(&self, frame: &Pose) -> Pose {
        let frame_rotation_inverse = frame.rotation.inverse();
        Pose {
            position: frame_rotation_inverse * (self.position - frame.position),
            rotation: frame_rotation_inverse * self.rotation,
        }
    }

    /// Convert into a [`rapier3d::na::Isometry3`]
    pub fn to_isometry(&self) -> na::Isometry3<f32> {
        let p = self.position;
        let r = self.rotation;
        let translation = na::Translation3::new(p.x, p.y, p.z);
        let rotation = na::UnitQuaternion::new_unchecked(na::Quaternion::new(r.w, r.x, r.y, r.z));

        na::Isometry3::from_parts(translation, rotation)
    }

    /// Convert from a [`rapier3d::na::Isometry3`]
    pub fn from_isometry(isometry: &na::Isometry3<f32>) -> Pose {
        let t = isometry.translation.vector;
        let r = isometry.rotation.quaternion();
        Pose {
            position: Vec3::new(t.x, t.y, t.z),
            rotation: Quat::from_xyzw(r.i, r.j, r.k, r.w),
        }
    }
}

impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * rhs.position,
            rotation: self.rotation * rhs.rotation,
        }
    }
}

#[inline]
/// Convert a [`glam::Vec3`] into a [`rapier3d::na::Vector3`]
pub fn na_vector_from_glam(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}

#[inline]
/// Convert a [`rapier3d::na::Vector3`] into a [`glam::Vec3`]
pub fn glam_vec_from_na(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_inverse() {
        let pose = Pose::new(Vec3::new(1., 2., 3.), Quat::from_rotation_y(0.7));
        let identity = pose * pose.inverse();
        assert_relative_eq!(identity.position, Vec3::ZERO, epsilon = 1e-6);
        assert_relative_eq!(identity.rotation, Quat::IDENTITY, epsilon = 1e-6);
    }

    #[test]
    fn test_relative_to_round_trip() {
        let frame = Pose::new(Vec3::new(0.2, 1.4, -0.5), Quat::from_rotation_x(0.3));
        let object = Pose::new(Vec3::new(-1.0, 0.5, 2.0), Quat::from_rotation_z(1.1));
        let local = object.relative_to(&frame);
        let back = frame * local;
        assert_relative_eq!(back.position, object.position, epsilon = 1e-5);
        assert_relative_eq!(back.rotation, object.rotation, epsilon = 1e-5);
    }

    #[test]
    fn test_transform_point() {
        let pose = Pose::new(Vec3::new(0., 1., 0.), Quat::from_rotation_y(FRAC_PI_2));
        assert_relative_eq!(
            pose.transform_point(Vec3::X),
            Vec3::new(0., 1., -1.),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_isometry_conversion() {
        let pose = Pose::new(Vec3::new(3., -2., 1.), Quat::from_rotation_x(0.25));
        let isometry = pose.to_isometry();
        let point = isometry * na::Point3::new(1.0, 0.0, 0.0);
        let expected = pose.transform_point(Vec3::X);
        assert_relative_eq!(Vec3::new(point.x, point.y, point.z), expected, epsilon = 1e-5);

        let back = Pose::from_isometry(&isometry);
        assert_relative_eq!(back.position, pose.position);
        assert_relative_eq!(back.rotation, pose.rotation, epsilon = 1e-6);
    }
}

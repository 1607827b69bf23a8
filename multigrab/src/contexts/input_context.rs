use glam::Vec3;

use crate::{components::Handedness, util::Pose};

/// One reading from a tracked controller, as handed over by the host's input layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerSample {
    /// How far the grip is squeezed, from 0 to 1
    pub grip_analog: f32,
    /// Pose of the controller grip in tracking (stage) space
    pub stage_from_grip: Pose,
    /// Linear velocity in tracking space
    pub linear_velocity: Vec3,
    /// Angular velocity in tracking space
    pub angular_velocity: Vec3,
}

/// The most recent state of a single controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerInput {
    // float input
    grip_analog: f32,
    // vec3 input
    linear_velocity: Vec3,
    angular_velocity: Vec3,
    // pose input
    stage_from_grip: Pose,
}

impl ControllerInput {
    pub fn grip_analog(&self) -> f32 {
        self.grip_analog
    }
    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }
    pub fn stage_from_grip(&self) -> Pose {
        self.stage_from_grip
    }

    /// Replace the current state with a fresh sample
    pub fn update(&mut self, sample: ControllerSample) {
        self.grip_analog = sample.grip_analog;
        self.linear_velocity = sample.linear_velocity;
        self.angular_velocity = sample.angular_velocity;
        self.stage_from_grip = sample.stage_from_grip;
    }
}

/// Controller state for both hands, keyed by [`Handedness`].
///
/// Polling the actual device is up to the host: feed it samples with [`InputContext::update`] before
/// running the grabbing systems.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub left: ControllerInput,
    pub right: ControllerInput,
}

impl InputContext {
    /// Get the state of one controller
    pub fn controller(&self, handedness: Handedness) -> &ControllerInput {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    /// Store a fresh sample for one controller
    pub fn update(&mut self, handedness: Handedness, sample: ControllerSample) {
        match handedness {
            Handedness::Left => self.left.update(sample),
            Handedness::Right => self.right.update(sample),
        }
    }

    /// An input context with both controllers resting at sensible positions in front of the player
    pub fn testing() -> Self {
        let mut input_context = InputContext::default();
        input_context.update(
            Handedness::Left,
            ControllerSample {
                stage_from_grip: Pose::from_position(Vec3::new(-0.2, 1.4, -0.5)),
                ..Default::default()
            },
        );
        input_context.update(
            Handedness::Right,
            ControllerSample {
                stage_from_grip: Pose::from_position(Vec3::new(0.2, 1.4, -0.5)),
                ..Default::default()
            },
        );
        input_context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_update_routes_by_handedness() {
        let mut input_context = InputContext::testing();
        input_context.update(
            Handedness::Left,
            ControllerSample {
                grip_analog: 0.7,
                linear_velocity: Vec3::X,
                ..Default::default()
            },
        );

        let left = input_context.controller(Handedness::Left);
        assert_relative_eq!(left.grip_analog(), 0.7);
        assert_relative_eq!(left.linear_velocity(), Vec3::X);

        let right = input_context.controller(Handedness::Right);
        assert_relative_eq!(right.grip_analog(), 0.0);
        assert_relative_eq!(right.stage_from_grip().position, Vec3::new(0.2, 1.4, -0.5));
    }
}

use hecs::Entity;

use super::{GrabCandidates, GrabberConfig, LocalTransform};
use crate::{util::Pose, MultigrabResult};

/// Whether a grabber is currently holding on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GrabState {
    /// Hand open, grab volumes collecting candidates
    #[default]
    Released,
    /// Hand closed. The grab volumes are off, even if nothing was in reach when the grab began.
    Grabbing,
}

/// The frame the controller's tracked pose is expressed in, usually the player's stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceFrame {
    /// A fixed pose in the world
    Fixed(Pose),
    /// Follow an entity: its rigid body if it has one, otherwise its [`LocalTransform`]
    Entity(Entity),
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        ReferenceFrame::Fixed(Pose::IDENTITY)
    }
}

/// A component that lets a tracked controller pick up every [`super::Grabbable`] in reach.
///
/// The entity also needs a kinematic (position based) [`super::RigidBody`]: this is the "gripper" that gets
/// moved to follow the controller. Requires `grabbing_system` or calls to `on_updated_anchors`.
#[derive(Debug, Clone)]
pub struct Grabber {
    /// Static configuration
    pub config: GrabberConfig,
    /// Sensor colliders tagged with [`super::GrabVolume`] that find things to grab
    pub grab_volumes: Vec<Entity>,
    /// The frame the controller pose is relative to
    pub reference_frame: ReferenceFrame,
    pub(crate) state: GrabState,
    pub(crate) last_grip: f32,
    pub(crate) candidates: GrabCandidates,
    pub(crate) held: Vec<Entity>,
    pub(crate) grab_volumes_enabled: bool,
}

impl Grabber {
    /// Create a grabber, checking its configuration.
    pub fn new(config: GrabberConfig, grab_volumes: Vec<Entity>) -> MultigrabResult<Grabber> {
        config.validate()?;
        Ok(Grabber {
            config,
            grab_volumes,
            reference_frame: ReferenceFrame::default(),
            state: GrabState::Released,
            last_grip: 0.0,
            candidates: GrabCandidates::default(),
            held: Vec::new(),
            grab_volumes_enabled: true,
        })
    }

    /// Builder style helper to set the reference frame
    pub fn with_reference_frame(mut self, reference_frame: ReferenceFrame) -> Self {
        self.reference_frame = reference_frame;
        self
    }

    /// Use the grabber's configured local transform as its anchor offset, the way it was laid out
    /// underneath the controller in the scene.
    pub fn capture_anchor(&mut self, local_transform: &LocalTransform) {
        self.config.anchor_offset = local_transform.pose();
    }

    /// Offset between the tracked controller and the grabber's origin
    pub fn anchor_offset(&self) -> Pose {
        self.config.anchor_offset
    }

    /// The objects currently held, in the order they were picked up
    pub fn held_objects(&self) -> &[Entity] {
        &self.held
    }

    /// Grabbables currently in reach
    pub fn candidates(&self) -> &GrabCandidates {
        &self.candidates
    }

    /// Current grab state
    pub fn state(&self) -> GrabState {
        self.state
    }

    /// Is the grabber's hand closed?
    pub fn is_grabbing(&self) -> bool {
        self.state == GrabState::Grabbing
    }

    /// Are the grab volumes looking for candidates?
    pub fn grab_volumes_enabled(&self) -> bool {
        self.grab_volumes_enabled
    }

    /// The grip value seen on the previous update
    pub fn last_grip(&self) -> f32 {
        self.last_grip
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{GripThresholds, Handedness};
use crate::{util::Pose, MultigrabResult};

/// Who decides when a grabber catches up with its controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorUpdates {
    /// [`crate::systems::grabbing_system`] updates the grabber every tick
    #[default]
    Poll,
    /// The host calls [`crate::systems::on_updated_anchors`] whenever its tracking rig has new anchors.
    /// `grabbing_system` leaves this grabber alone.
    External,
}

/// How an overlapping entity is resolved to the grabbable it belongs to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrabbableLookup {
    /// Only the overlapping entity itself
    SelfOnly,
    /// The overlapping entity, then each of its [`super::Parent`]s in turn
    #[default]
    SelfThenAncestors,
}

/// Everything about a grabber that can be set up ahead of time.
///
/// Entity-valued settings (grab volumes, the reference frame) can't be written down in a config file,
/// so they're passed to [`super::Grabber::new`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabberConfig {
    /// The grip hysteresis band
    pub thresholds: GripThresholds,
    /// Make held objects children of the grabber instead of moving them every tick
    pub parent_held_objects: bool,
    /// Which controller drives this grabber
    pub handedness: Handedness,
    /// Polling or externally driven updates
    pub anchor_updates: AnchorUpdates,
    /// How overlaps are resolved to grabbables
    pub lookup: GrabbableLookup,
    /// Fixed offset between the tracked controller and the grabber's origin
    pub anchor_offset: Pose,
}

impl GrabberConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> MultigrabResult<Self> {
        let config: GrabberConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> MultigrabResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the configuration makes sense.
    pub fn validate(&self) -> MultigrabResult<()> {
        self.thresholds.validate()
    }
}

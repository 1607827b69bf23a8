use hecs::{ComponentError, Entity, NoSuchEntity};
use thiserror::Error;

/// Everything that can go wrong while driving a grabber.
#[derive(Error, Debug)]
pub enum MultigrabError {
    #[error("grab_begin ({grab_begin}) must be greater than grab_end ({grab_end}) and both must be finite")]
    /// The hysteresis band is empty or inverted
    InvalidThresholds {
        /// Configured begin threshold
        grab_begin: f32,
        /// Configured end threshold
        grab_end: f32,
    },
    #[error("Entity {0:?} does not have a rigid body in the physics world")]
    /// The entity has no `RigidBody` component, or its handle is stale
    MissingRigidBody(Entity),
    #[error("There was a problem reading a component")]
    /// A component was missing or already borrowed
    ComponentError(#[from] ComponentError),
    #[error("The entity does not exist")]
    /// The entity has been despawned
    NoSuchEntity(#[from] NoSuchEntity),
    #[error("The grabber configuration could not be parsed")]
    /// The JSON configuration was malformed
    ConfigError(#[from] serde_json::Error),
    #[error(transparent)]
    /// Reading a configuration file failed
    IO(#[from] std::io::Error),
    #[error(transparent)]
    /// Anything else
    Other(#[from] anyhow::Error),
}

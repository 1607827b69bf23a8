#![allow(missing_docs)]
pub mod input_context;
pub mod physics_context;

pub use input_context::{ControllerInput, ControllerSample, InputContext};
pub use physics_context::{IntersectionEvent, OverlapKind, PhysicsContext};

#![warn(missing_docs)]

//! G'day! `multigrab` lets a VR controller pick up *every* grabbable object it is touching at once.
//!
//! A [`components::Grabber`] follows a tracked controller around the world, keeps track of the
//! [`components::Grabbable`] objects overlapping its grab volumes, and turns the controller's analog
//! grip into discrete grab and release transitions. Held objects are carried along with the grabber
//! and thrown with the controller's velocity when they are let go.
//!
//! # Getting started
//! Spawn a [`components::Grabber`] with a kinematic rigid body, attach one or more sensor colliders tagged
//! with [`components::GrabVolume`], then call the systems once per physics tick:
//!
//! 1. [`systems::grab_detection_system`] to turn physics intersections into grab candidates
//! 1. [`systems::grabbing_system`] to follow the controller and grab or release
//! 1. [`systems::update_parented_held_objects_system`] if any grabber parents its held objects
//! 1. [`contexts::PhysicsContext::update`] to step the physics world

pub use glam;
pub use hecs;
pub use multigrab_error::MultigrabError;
pub use rapier3d;

/// Components are data that are used to update the simulation and interact with the external world
pub mod components;
/// Contexts are wrappers around some external state that the grabbers will interact with
pub mod contexts;
mod multigrab_error;
/// Systems are functions called each tick to update either the external state or the current simulation
pub mod systems;
/// Kitchen sink utility functions
pub mod util;

/// Multigrab result type
pub type MultigrabResult<T> = std::result::Result<T, MultigrabError>;

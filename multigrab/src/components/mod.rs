#![allow(missing_docs)]
pub mod collider;
pub mod grab_candidates;
pub mod grab_volume;
pub mod grabbable;
pub mod grabber;
pub mod grabber_config;
pub mod grip;
pub mod hand;
pub mod local_transform;
pub mod parent;
pub mod rigid_body;

pub use collider::Collider;
pub use grab_candidates::GrabCandidates;
pub use grab_volume::GrabVolume;
pub use grabbable::{Grabbable, Grabbed, Released};
pub use grabber::{GrabState, Grabber, ReferenceFrame};
pub use grabber_config::{AnchorUpdates, GrabbableLookup, GrabberConfig};
pub use grip::{EdgeSemantics, GripThresholds, GripTransition};
pub use hand::Handedness;
pub use local_transform::LocalTransform;
pub use parent::Parent;
pub use rigid_body::RigidBody;

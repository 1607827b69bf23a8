#![allow(missing_docs)]
pub mod grab_detection;
pub mod grabbable;
pub mod grabbing;
pub mod parenting;

pub use grab_detection::{apply_overlap_event, grab_detection_system, resolve_grabbable, OverlapEvent};
pub use grabbable::{begin_grab, end_grab};
pub use grabbing::{
    follow_pose, force_release, grabber_teardown, grabbing_system, on_updated_anchors,
    release_velocities,
};
pub use parenting::update_parented_held_objects_system;

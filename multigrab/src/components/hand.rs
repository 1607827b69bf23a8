use serde::{Deserialize, Serialize};

/// A component that represents the "side" or "handedness" that an entity is on
/// Used by `Grabber` to identify which controller it should map to
#[derive(
    Debug, Default, PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Handedness {
    /// Left hand side
    Left,
    /// Right hand side
    #[default]
    Right,
}


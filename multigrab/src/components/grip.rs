use serde::{Deserialize, Serialize};

use crate::{MultigrabError, MultigrabResult};

/// How two consecutive grip samples are compared against the thresholds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSemantics {
    /// Compare the samples in the order they were recorded, with the previous sample on the threshold side:
    ///
    /// - Begin when `previous >= grab_begin` and `current < grab_begin`
    /// - End when `previous <= grab_end` and `current > grab_end`
    ///
    /// A grab therefore starts as the grip *falls* back through `grab_begin`, and ends as it rises back
    /// out of the band below `grab_end`.
    #[default]
    Recorded,
    /// The conventional trigger reading:
    ///
    /// - Begin when the grip rises to `grab_begin` or above
    /// - End when the grip falls to `grab_end` or below
    Pressure,
}

/// A discrete change in grab state produced by [`GripThresholds::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripTransition {
    /// Start holding whatever is in reach
    Begin,
    /// Let go of everything
    End,
}

/// A hysteresis band over the analog grip signal.
///
/// Using two thresholds keeps a grip hovering around a single value from grabbing and releasing every
/// tick: nothing happens while the signal stays strictly between `grab_end` and `grab_begin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripThresholds {
    /// Crossing this value begins a grab
    pub grab_begin: f32,
    /// Crossing this value ends a grab. Must be below `grab_begin`
    pub grab_end: f32,
    /// Which crossings count
    pub edges: EdgeSemantics,
}

impl Default for GripThresholds {
    fn default() -> Self {
        Self {
            grab_begin: 0.55,
            grab_end: 0.35,
            edges: EdgeSemantics::default(),
        }
    }
}

impl GripThresholds {
    /// Check that the band is non-degenerate.
    pub fn validate(&self) -> MultigrabResult<()> {
        let finite = self.grab_begin.is_finite() && self.grab_end.is_finite();
        if finite && self.grab_begin > self.grab_end {
            Ok(())
        } else {
            Err(MultigrabError::InvalidThresholds {
                grab_begin: self.grab_begin,
                grab_end: self.grab_end,
            })
        }
    }

    /// Work out whether going from `previous` to `current` crosses an edge.
    ///
    /// Begin takes priority: End is only checked when Begin did not fire.
    pub fn transition(&self, previous: f32, current: f32) -> Option<GripTransition> {
        let (begin, end) = match self.edges {
            EdgeSemantics::Recorded => (
                previous >= self.grab_begin && current < self.grab_begin,
                previous <= self.grab_end && current > self.grab_end,
            ),
            EdgeSemantics::Pressure => (
                current >= self.grab_begin && previous < self.grab_begin,
                current <= self.grab_end && previous > self.grab_end,
            ),
        };

        if begin {
            Some(GripTransition::Begin)
        } else if end {
            Some(GripTransition::End)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded() -> GripThresholds {
        GripThresholds::default()
    }

    fn pressure() -> GripThresholds {
        GripThresholds {
            edges: EdgeSemantics::Pressure,
            ..Default::default()
        }
    }

    #[test]
    fn test_recorded_edges_are_pinned() {
        let thresholds = recorded();

        // Squeezing through grab_begin does nothing..
        assert_eq!(thresholds.transition(0.5, 0.6), None);
        // ..falling back through it begins the grab.
        assert_eq!(thresholds.transition(0.6, 0.5), Some(GripTransition::Begin));
        assert_eq!(thresholds.transition(0.55, 0.54), Some(GripTransition::Begin));
        // Falling through grab_end does nothing..
        assert_eq!(thresholds.transition(0.4, 0.3), None);
        // ..rising back out of it ends the grab.
        assert_eq!(thresholds.transition(0.3, 0.4), Some(GripTransition::End));
        assert_eq!(thresholds.transition(0.35, 0.36), Some(GripTransition::End));
    }

    #[test]
    fn test_pressure_edges() {
        let thresholds = pressure();

        assert_eq!(thresholds.transition(0.5, 0.6), Some(GripTransition::Begin));
        assert_eq!(thresholds.transition(0.54, 0.55), Some(GripTransition::Begin));
        assert_eq!(thresholds.transition(0.6, 0.5), None);
        assert_eq!(thresholds.transition(0.4, 0.3), Some(GripTransition::End));
        assert_eq!(thresholds.transition(0.36, 0.35), Some(GripTransition::End));
        assert_eq!(thresholds.transition(0.3, 0.4), None);
    }

    #[test]
    fn test_begin_wins_over_end() {
        // A single tick that crosses the whole band only reports Begin.
        assert_eq!(recorded().transition(0.9, 0.1), Some(GripTransition::Begin));
        assert_eq!(pressure().transition(0.1, 0.9), Some(GripTransition::Begin));
    }

    #[test]
    fn test_no_chatter_inside_band() {
        let samples = [0.36, 0.5, 0.4, 0.54, 0.45, 0.36, 0.53];
        for thresholds in [recorded(), pressure()] {
            for pair in samples.windows(2) {
                assert_eq!(thresholds.transition(pair[0], pair[1]), None);
            }
        }
    }

    #[test]
    fn test_validate() {
        assert!(GripThresholds::default().validate().is_ok());

        let inverted = GripThresholds {
            grab_begin: 0.3,
            grab_end: 0.6,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(MultigrabError::InvalidThresholds { .. })
        ));

        let degenerate = GripThresholds {
            grab_begin: 0.5,
            grab_end: 0.5,
            ..Default::default()
        };
        assert!(degenerate.validate().is_err());

        let nan = GripThresholds {
            grab_begin: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }
}

//! Per-module calibration constants

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::charmap::CharacterMap;

/// Half-step phases per flap on a 28BYJ-48 with an 11-flap wheel
pub const DEFAULT_STEPS_PER_FLIP: u16 = 128;

/// Blank plus the ten digits
pub const DEFAULT_FLAP_COUNT: u8 = CharacterMap::LEN as u8;

/// Phase-steps allowed while searching for the home edge
///
/// A little over one and a half revolutions of the default wheel.
pub const DEFAULT_HOMING_LIMIT: u32 = 6_400;

/// Calibration of a single flap module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    /// Phase-steps to advance the wheel by one flap
    pub steps_per_flip: u16,
    /// Number of flaps on the wheel
    pub flap_count: u8,
    /// Flaps between the sensor edge and flap 0
    pub offset: u8,
    /// Maximum phase-steps spent searching for the sensor edge
    pub homing_limit: u32,
}

impl Calibration {
    /// Phase-steps in one full turn of the wheel
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_flip as u32 * self.flap_count as u32
    }

    /// Phase-steps from the sensor edge to flap 0
    pub fn alignment_steps(&self) -> u32 {
        (self.offset as u32 + 1) * self.steps_per_flip as u32
    }

    /// Forward distance in flaps from `from` to `to`
    ///
    /// Both positions must be below `flap_count`.
    pub fn flaps_between(&self, from: u8, to: u8) -> u8 {
        let n = self.flap_count as u16;
        ((to as u16 + n - from as u16) % n) as u8
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            steps_per_flip: DEFAULT_STEPS_PER_FLIP,
            flap_count: DEFAULT_FLAP_COUNT,
            offset: 0,
            homing_limit: DEFAULT_HOMING_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_revolution() {
        let cal = Calibration::default();
        assert_eq!(cal.flap_count, 11);
        assert_eq!(cal.steps_per_revolution(), 1408);
        assert!(cal.homing_limit > cal.steps_per_revolution());
    }

    #[test]
    fn test_alignment_steps() {
        let cal = Calibration {
            offset: 15,
            ..Calibration::default()
        };
        assert_eq!(cal.alignment_steps(), 16 * 128);
    }

    #[test]
    fn test_flaps_between_wraps_forward() {
        let cal = Calibration::default();
        assert_eq!(cal.flaps_between(3, 4), 1);
        assert_eq!(cal.flaps_between(4, 3), 10);
        assert_eq!(cal.flaps_between(5, 5), 0);
        assert_eq!(cal.flaps_between(10, 0), 1);
    }
}

//! Flap module positioning
//!
//! A flap module is one wheel of flaps turned by a stepper, with a single
//! home sensor as its only position feedback. Everything else is dead
//! reckoning from the phase count.

pub mod calibration;
pub mod charmap;
pub mod module;

pub use calibration::{
    Calibration, DEFAULT_FLAP_COUNT, DEFAULT_HOMING_LIMIT, DEFAULT_STEPS_PER_FLIP,
};
pub use charmap::CharacterMap;
pub use module::{CharMove, FlapError, FlapModule, HomeOutcome, ModuleState};

//! Motion primitives
//!
//! The half-step phase table shared by every coil driver, and the edge
//! detector used while homing a flap wheel.

pub mod homing;
pub mod phase;

pub use homing::HomingState;
pub use phase::{phase_at, StepPhase, COIL_COUNT, HALF_STEP_SEQUENCE, PHASE_COUNT};

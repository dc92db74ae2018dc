//! Hardware abstraction traits
//!
//! These traits define the interface between the flap logic and the
//! board-specific coil drivers and sensors.

pub mod sensor;
pub mod stepper;

pub use sensor::HomeSensor;
pub use stepper::PhaseDriver;

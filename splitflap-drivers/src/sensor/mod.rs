//! Home position sensors

pub mod hall;

pub use hall::HallSensor;

//! Multi-digit display
//!
//! Renders a counter value across an ordered row of flap modules,
//! moving only the wheels whose digit changed.

pub mod controller;
pub mod digits;

pub use controller::{DisplayController, RenderReport, ResyncReport, MAX_WIDTH};
pub use digits::{format_digits, MAX_DIGITS};

//! Configuration types
//!
//! Board-agnostic description of the display wiring and calibration,
//! parsed at boot from the TOML file embedded in the firmware image.

pub mod hardware;
pub mod parse;

pub use hardware::*;
pub use parse::{parse_config, ParseError};

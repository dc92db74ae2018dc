//! Board-agnostic core logic for the split-flap counter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (coil driver, home sensor)
//! - Half-step phase table and the homing state machine
//! - Flap module positioning and the character map
//! - Display controller (counter to digits, delta-only moves)
//! - Command dispatch for the control endpoint
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod display;
pub mod flap;
pub mod motion;
pub mod traits;

#[cfg(test)]
mod sim;

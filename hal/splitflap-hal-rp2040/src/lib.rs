//! RP2040-specific HAL for the split-flap firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `splitflap-hal` traits, plus RP2040-specific functionality:
//!
//! - Dynamic pin allocation for config-driven setup
//! - GPIO wrappers honouring the config's inversion and pull-up flags
//! - UART pin mapping for the serial WiFi bridge

#![no_std]

pub mod gpio;
pub mod pins;
pub mod uart;

// Re-export shared traits from splitflap-hal for convenience
pub use splitflap_hal::{InputPin, OutputPin};

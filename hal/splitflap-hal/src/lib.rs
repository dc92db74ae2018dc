//! Splitflap Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the split-flap logic
//! consumes. Chip-specific HALs implement them; tests substitute
//! simulated pins and clocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  splitflap-core / splitflap-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  splitflap-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ splitflap-hal-    │
//!           │     rp2040        │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`clock::StepClock`] - Fixed-rate blocking delay between motor phases

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use clock::{DelayClock, StepClock};
pub use gpio::{InputPin, OutputPin};

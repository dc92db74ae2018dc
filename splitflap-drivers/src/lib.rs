//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in splitflap-core on top of the pin traits from splitflap-hal:
//!
//! - Stepper coil driver (ULN2003 Darlington array)
//! - Home sensor (A3144-style open-collector hall switch)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
pub mod stepper;

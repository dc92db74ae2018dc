//! GPIO wrappers
//!
//! Adapts embassy-rp pins to the `splitflap-hal` traits. Inversion from the
//! pin config is applied here, so drivers only ever see logical levels.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use splitflap_core::config::PinConfig;

/// Push-pull output
pub struct RpOutput {
    pin: Output<'static>,
    inverted: bool,
}

impl RpOutput {
    /// Configure `pin` as an output, logically low
    pub fn new(pin: Peri<'static, AnyPin>, config: &PinConfig) -> Self {
        let initial = if config.inverted {
            Level::High
        } else {
            Level::Low
        };
        Self {
            pin: Output::new(pin, initial),
            inverted: config.inverted,
        }
    }
}

impl splitflap_hal::OutputPin for RpOutput {
    fn set_high(&mut self) {
        if self.inverted {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
    }

    fn set_low(&mut self) {
        if self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}

/// Digital input
pub struct RpInput {
    pin: Input<'static>,
    inverted: bool,
}

impl RpInput {
    /// Configure `pin` as an input
    pub fn new(pin: Peri<'static, AnyPin>, config: &PinConfig) -> Self {
        let pull = if config.pull_up { Pull::Up } else { Pull::None };
        Self {
            pin: Input::new(pin, pull),
            inverted: config.inverted,
        }
    }
}

impl splitflap_hal::InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}

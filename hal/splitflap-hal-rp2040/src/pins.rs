//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so coil and
//! sensor wiring can come from `flaps.toml` instead of being hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::{peripherals, Peri, Peripherals};
use splitflap_core::config::PinConfig;

use crate::gpio::{RpInput, RpOutput};

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
}

/// Pin bank that holds the GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Move every pin still left in `p` into the bank
    ///
    /// Pins already taken out of `p` (for example by the bridge UART) are
    /// reported as [`PinError::AlreadyTaken`].
    pub fn new(p: PinBankPeripherals) -> Self {
        Self {
            pins: [
                p.pin0.map(Into::into),
                p.pin1.map(Into::into),
                p.pin2.map(Into::into),
                p.pin3.map(Into::into),
                p.pin4.map(Into::into),
                p.pin5.map(Into::into),
                p.pin6.map(Into::into),
                p.pin7.map(Into::into),
                p.pin8.map(Into::into),
                p.pin9.map(Into::into),
                p.pin10.map(Into::into),
                p.pin11.map(Into::into),
                p.pin12.map(Into::into),
                p.pin13.map(Into::into),
                p.pin14.map(Into::into),
                p.pin15.map(Into::into),
                p.pin16.map(Into::into),
                p.pin17.map(Into::into),
                p.pin18.map(Into::into),
                p.pin19.map(Into::into),
                p.pin20.map(Into::into),
                p.pin21.map(Into::into),
                p.pin22.map(Into::into),
                p.pin23.map(Into::into),
                p.pin24.map(Into::into),
                p.pin25.map(Into::into),
                p.pin26.map(Into::into),
                p.pin27.map(Into::into),
                p.pin28.map(Into::into),
                p.pin29.map(Into::into),
            ],
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin(pin_num))?
            .take()
            .ok_or(PinError::AlreadyTaken(pin_num))
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        matches!(self.pins.get(pin_num as usize), Some(Some(_)))
    }

    /// Take the pin described by `config` as an output
    pub fn output(&mut self, config: &PinConfig) -> Result<RpOutput, PinError> {
        Ok(RpOutput::new(self.take(config.pin)?, config))
    }

    /// Take the pin described by `config` as an input
    pub fn input(&mut self, config: &PinConfig) -> Result<RpInput, PinError> {
        Ok(RpInput::new(self.take(config.pin)?, config))
    }
}

/// GPIO pins not yet moved into a [`PinBank`]
///
/// Using Option allows taking typed pins individually (the UART needs
/// them) before handing the rest to the bank.
pub struct PinBankPeripherals {
    pub pin0: Option<Peri<'static, peripherals::PIN_0>>,
    pub pin1: Option<Peri<'static, peripherals::PIN_1>>,
    pub pin2: Option<Peri<'static, peripherals::PIN_2>>,
    pub pin3: Option<Peri<'static, peripherals::PIN_3>>,
    pub pin4: Option<Peri<'static, peripherals::PIN_4>>,
    pub pin5: Option<Peri<'static, peripherals::PIN_5>>,
    pub pin6: Option<Peri<'static, peripherals::PIN_6>>,
    pub pin7: Option<Peri<'static, peripherals::PIN_7>>,
    pub pin8: Option<Peri<'static, peripherals::PIN_8>>,
    pub pin9: Option<Peri<'static, peripherals::PIN_9>>,
    pub pin10: Option<Peri<'static, peripherals::PIN_10>>,
    pub pin11: Option<Peri<'static, peripherals::PIN_11>>,
    pub pin12: Option<Peri<'static, peripherals::PIN_12>>,
    pub pin13: Option<Peri<'static, peripherals::PIN_13>>,
    pub pin14: Option<Peri<'static, peripherals::PIN_14>>,
    pub pin15: Option<Peri<'static, peripherals::PIN_15>>,
    pub pin16: Option<Peri<'static, peripherals::PIN_16>>,
    pub pin17: Option<Peri<'static, peripherals::PIN_17>>,
    pub pin18: Option<Peri<'static, peripherals::PIN_18>>,
    pub pin19: Option<Peri<'static, peripherals::PIN_19>>,
    pub pin20: Option<Peri<'static, peripherals::PIN_20>>,
    pub pin21: Option<Peri<'static, peripherals::PIN_21>>,
    pub pin22: Option<Peri<'static, peripherals::PIN_22>>,
    pub pin23: Option<Peri<'static, peripherals::PIN_23>>,
    pub pin24: Option<Peri<'static, peripherals::PIN_24>>,
    pub pin25: Option<Peri<'static, peripherals::PIN_25>>,
    pub pin26: Option<Peri<'static, peripherals::PIN_26>>,
    pub pin27: Option<Peri<'static, peripherals::PIN_27>>,
    pub pin28: Option<Peri<'static, peripherals::PIN_28>>,
    pub pin29: Option<Peri<'static, peripherals::PIN_29>>,
}

/// Non-GPIO peripherals that remain after splitting off the pins
pub struct RemainingPeripherals {
    pub uart0: Peri<'static, peripherals::UART0>,
    pub uart1: Peri<'static, peripherals::UART1>,
}

impl PinBankPeripherals {
    /// Split Embassy peripherals into pins and the rest
    pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
        let pins = Self {
            pin0: Some(p.PIN_0),
            pin1: Some(p.PIN_1),
            pin2: Some(p.PIN_2),
            pin3: Some(p.PIN_3),
            pin4: Some(p.PIN_4),
            pin5: Some(p.PIN_5),
            pin6: Some(p.PIN_6),
            pin7: Some(p.PIN_7),
            pin8: Some(p.PIN_8),
            pin9: Some(p.PIN_9),
            pin10: Some(p.PIN_10),
            pin11: Some(p.PIN_11),
            pin12: Some(p.PIN_12),
            pin13: Some(p.PIN_13),
            pin14: Some(p.PIN_14),
            pin15: Some(p.PIN_15),
            pin16: Some(p.PIN_16),
            pin17: Some(p.PIN_17),
            pin18: Some(p.PIN_18),
            pin19: Some(p.PIN_19),
            pin20: Some(p.PIN_20),
            pin21: Some(p.PIN_21),
            pin22: Some(p.PIN_22),
            pin23: Some(p.PIN_23),
            pin24: Some(p.PIN_24),
            pin25: Some(p.PIN_25),
            pin26: Some(p.PIN_26),
            pin27: Some(p.PIN_27),
            pin28: Some(p.PIN_28),
            pin29: Some(p.PIN_29),
        };
        let remaining = RemainingPeripherals {
            uart0: p.UART0,
            uart1: p.UART1,
        };
        (pins, remaining)
    }
}

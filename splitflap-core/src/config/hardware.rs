//! Hardware configuration types
//!
//! These types define the pin assignments of every flap module and of the
//! serial bridge, plus the per-module calibration.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::flap::{
    Calibration, CharacterMap, DEFAULT_FLAP_COUNT, DEFAULT_HOMING_LIMIT, DEFAULT_STEPS_PER_FLIP,
};
use crate::motion::COIL_COUNT;
use splitflap_hal::clock::DEFAULT_STEP_INTERVAL_US;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum flap modules (digits) per display
pub const MAX_MODULES: usize = crate::display::MAX_WIDTH;

/// Default bridge baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Invert the pin's logic level
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// One flap module: coil driver pins, home sensor and calibration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleHwConfig {
    /// Module name (e.g., "tens", "ones")
    pub name: String<MAX_LABEL_LEN>,
    /// ULN2003 inputs IN1..IN4
    pub coil_pins: [PinConfig; COIL_COUNT],
    /// Hall sensor pin (active-low unless inverted)
    pub home_pin: PinConfig,
    /// Phase-steps per flap
    pub steps_per_flip: u16,
    /// Flaps on the wheel
    pub flap_count: u8,
    /// Flaps to advance past the sensor edge before the blank flap
    ///
    /// May exceed `flap_count`, in which case alignment takes extra turns.
    pub offset: u8,
    /// Walk the phase table backwards
    pub reversed: bool,
}

impl ModuleHwConfig {
    /// Module with default calibration and unassigned pins
    pub fn named(name: String<MAX_LABEL_LEN>) -> Self {
        Self {
            name,
            coil_pins: [PinConfig::default(); COIL_COUNT],
            home_pin: PinConfig::with_pullup(0),
            steps_per_flip: DEFAULT_STEPS_PER_FLIP,
            flap_count: DEFAULT_FLAP_COUNT,
            offset: 0,
            reversed: false,
        }
    }

    /// Calibration for the flap module built from this config
    pub fn calibration(&self, homing_limit: u32) -> Calibration {
        Calibration {
            steps_per_flip: self.steps_per_flip,
            flap_count: self.flap_count,
            offset: self.offset,
            homing_limit,
        }
    }

    /// All pins this module claims
    pub fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        self.coil_pins
            .iter()
            .map(|p| p.pin)
            .chain(core::iter::once(self.home_pin.pin))
    }
}

/// Serial WiFi bridge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// UART TX pin (towards the bridge)
    pub tx_pin: u8,
    /// UART RX pin (from the bridge)
    pub rx_pin: u8,
    /// Baud rate
    pub baud_rate: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            tx_pin: 0,
            rx_pin: 1,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Delay between motor phases in microseconds
    pub step_interval_us: u32,
    /// Phase-steps allowed per homing run
    pub homing_limit: u32,
    /// Serial bridge
    pub bridge: BridgeConfig,
    /// Modules, most significant digit first
    pub modules: Vec<ModuleHwConfig, MAX_MODULES>,
}

/// Semantic configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No [module.*] section
    NoModules,
    /// A wheel has fewer flaps than printed characters
    FlapCountTooSmall { module: u8 },
    /// steps_per_flip is zero
    ZeroStepsPerFlip { module: u8 },
    /// Step interval or homing limit is zero
    InvalidTiming,
    /// The same GPIO is assigned twice
    PinConflict { pin: u8 },
}

impl DisplayConfig {
    /// Empty configuration with default timing
    pub fn new() -> Self {
        Self {
            step_interval_us: DEFAULT_STEP_INTERVAL_US,
            homing_limit: DEFAULT_HOMING_LIMIT,
            bridge: BridgeConfig::default(),
            modules: Vec::new(),
        }
    }

    /// Find module config by name
    pub fn find_module(&self, name: &str) -> Option<&ModuleHwConfig> {
        self.modules.iter().find(|m| m.name.as_str() == name)
    }

    /// Check the configuration before building hardware from it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modules.is_empty() {
            return Err(ConfigError::NoModules);
        }
        if self.step_interval_us == 0 || self.homing_limit == 0 {
            return Err(ConfigError::InvalidTiming);
        }

        for (i, m) in self.modules.iter().enumerate() {
            let module = i as u8;
            if (m.flap_count as usize) < CharacterMap::LEN {
                return Err(ConfigError::FlapCountTooSmall { module });
            }
            if m.steps_per_flip == 0 {
                return Err(ConfigError::ZeroStepsPerFlip { module });
            }
        }

        // Bitmap of claimed GPIOs
        let mut used: u64 = 0;
        let pins = self
            .modules
            .iter()
            .flat_map(|m| m.pins())
            .chain([self.bridge.tx_pin, self.bridge.rx_pin]);
        for pin in pins {
            let bit = 1u64.checked_shl(pin as u32).unwrap_or(0);
            if used & bit != 0 {
                return Err(ConfigError::PinConflict { pin });
            }
            used |= bit;
        }

        Ok(())
    }
}

impl Default for DisplayConfig {
    /// Two-digit counter on a Raspberry Pi Pico
    fn default() -> Self {
        let mut config = Self::new();
        let modules = [
            ("tens", [2, 3, 4, 5], 6, 15),
            ("ones", [10, 11, 12, 13], 14, 11),
        ];
        for (name, coils, home, offset) in modules {
            let mut m = ModuleHwConfig::named(String::try_from(name).unwrap_or_default());
            m.coil_pins = coils.map(PinConfig::new);
            m.home_pin = PinConfig::with_pullup(home);
            m.offset = offset;
            m.reversed = true;
            // Capacity is MAX_MODULES
            let _ = config.modules.push(m);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_config() {
        let pin = PinConfig::new(5);
        assert_eq!(pin.pin, 5);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        assert!(PinConfig::inverted(3).inverted);
        assert!(PinConfig::with_pullup(4).pull_up);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = DisplayConfig::default();
        assert_eq!(config.modules.len(), 2);
        assert_eq!(config.modules[0].name.as_str(), "tens");
        assert_eq!(config.modules[0].offset, 15);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_calibration_from_module() {
        let config = DisplayConfig::default();
        let cal = config.modules[1].calibration(config.homing_limit);
        assert_eq!(cal.steps_per_flip, 128);
        assert_eq!(cal.flap_count, 11);
        assert_eq!(cal.offset, 11);
        assert_eq!(cal.homing_limit, 6400);
    }

    #[test]
    fn test_find_module() {
        let config = DisplayConfig::default();
        assert!(config.find_module("ones").is_some());
        assert!(config.find_module("hundreds").is_none());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(DisplayConfig::new().validate(), Err(ConfigError::NoModules));
    }

    #[test]
    fn test_validate_rejects_pin_conflict() {
        let mut config = DisplayConfig::default();
        config.modules[1].home_pin.pin = 3;
        assert_eq!(config.validate(), Err(ConfigError::PinConflict { pin: 3 }));

        let mut config = DisplayConfig::default();
        config.bridge.tx_pin = 12;
        assert_eq!(config.validate(), Err(ConfigError::PinConflict { pin: 12 }));
    }

    #[test]
    fn test_validate_rejects_bad_calibration() {
        let mut config = DisplayConfig::default();
        config.modules[1].flap_count = 10;
        assert_eq!(
            config.validate(),
            Err(ConfigError::FlapCountTooSmall { module: 1 })
        );

        let mut config = DisplayConfig::default();
        config.modules[0].steps_per_flip = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroStepsPerFlip { module: 0 })
        );

        let mut config = DisplayConfig::default();
        config.homing_limit = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));
    }
}

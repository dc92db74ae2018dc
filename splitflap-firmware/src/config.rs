//! Embedded configuration loading
//!
//! `flaps.toml` is compiled into the image and checked by `build.rs`, so a
//! parse failure here means the file and the firmware disagree. The
//! built-in default keeps the counter usable in that case.

use defmt::*;
use splitflap_core::config::{parse_config, DisplayConfig};

/// Embedded configuration (compiled into firmware)
/// Edit flaps.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../flaps.toml");

/// Parse and validate the embedded configuration
pub fn load_config() -> DisplayConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using built-in default configuration");
            return DisplayConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Embedded config rejected: {:?}", e);
        warn!("Using built-in default configuration");
        return DisplayConfig::default();
    }

    info!(
        "Config loaded: {} modules, {} us/step, homing limit {}",
        config.modules.len(),
        config.step_interval_us,
        config.homing_limit
    );
    for module in config.modules.iter() {
        debug!(
            "Module {}: coils {:?}, home gpio{}, offset {}, reversed {}",
            module.name.as_str(),
            module.coil_pins.map(|p| p.pin),
            module.home_pin.pin,
            module.offset,
            module.reversed
        );
    }

    config
}

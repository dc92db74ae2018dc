//! Minimal TOML parser for the display configuration
//!
//! Handles only the subset used by `flaps.toml`. It does NOT support the
//! full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Flat arrays of strings: `coil_pins = ["gpio2", "gpio3", ...]`
//! - [section] and [module.<name>] headers
//! - Comments (# ...)
//!
//! Module sections are kept in file order, which is also digit order.

use heapless::String;

use super::hardware::{DisplayConfig, ModuleHwConfig, PinConfig, MAX_LABEL_LEN};
use crate::motion::COIL_COUNT;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not known in its section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Bridge,
    Module,
}

/// Parse TOML configuration into a [`DisplayConfig`]
///
/// Missing keys keep their defaults. The result still needs
/// [`DisplayConfig::validate`].
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::new();
    let mut section = Section::Root;
    let mut current_module: Option<ModuleHwConfig> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            save_module(&mut config, &mut current_module)?;

            let (next, name) = parse_section_header(&line[1..line.len() - 1])?;
            if let Some(name) = name {
                current_module = Some(ModuleHwConfig::named(name));
            }
            section = next;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&section, key, value, &mut config, &mut current_module)?;
    }

    save_module(&mut config, &mut current_module)?;
    Ok(config)
}

/// Parse the text between the brackets of a section header
fn parse_section_header(
    header: &str,
) -> Result<(Section, Option<String<MAX_LABEL_LEN>>), ParseError> {
    let header = header.trim();
    match header {
        "display" => Ok((Section::Display, None)),
        "bridge" => Ok((Section::Bridge, None)),
        _ => {
            let name = header
                .strip_prefix("module.")
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or(ParseError::InvalidSection)?;
            let name = String::try_from(name).map_err(|_| ParseError::InvalidSection)?;
            Ok((Section::Module, Some(name)))
        }
    }
}

/// Split `key = value`, dropping trailing comments
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Only when the # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_value(
    section: &Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
    current_module: &mut Option<ModuleHwConfig>,
) -> Result<(), ParseError> {
    match section {
        Section::Display => match key {
            "step_interval_us" => config.step_interval_us = parse_int(value)?,
            "homing_limit" => config.homing_limit = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Bridge => match key {
            "tx_pin" | "uart_tx_pin" => config.bridge.tx_pin = parse_pin(value)?.pin,
            "rx_pin" | "uart_rx_pin" => config.bridge.rx_pin = parse_pin(value)?.pin,
            "baud" | "baud_rate" => config.bridge.baud_rate = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Module => {
            let m = current_module.as_mut().ok_or(ParseError::InvalidSection)?;
            match key {
                "coil_pins" => m.coil_pins = parse_coil_pins(value)?,
                "home_pin" => m.home_pin = parse_pin(value)?,
                "steps_per_flip" => m.steps_per_flip = parse_int(value)?,
                "flap_count" => m.flap_count = parse_int(value)?,
                "offset" => m.offset = parse_int(value)?,
                "reversed" => m.reversed = parse_bool(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Root => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

/// Append the module being built, if any
fn save_module(
    config: &mut DisplayConfig,
    current_module: &mut Option<ModuleHwConfig>,
) -> Result<(), ParseError> {
    if let Some(m) = current_module.take() {
        config
            .modules
            .push(m)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(())
}

/// Strip surrounding quotes
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value)?;
    let mut inverted = false;
    let mut pull_up = false;

    // Check for modifiers
    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin = s
        .strip_prefix("gpio")
        .ok_or(ParseError::InvalidPin)?
        .parse()
        .map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

/// Parse `["gpio2", "gpio3", "gpio4", "gpio5"]`
fn parse_coil_pins(value: &str) -> Result<[PinConfig; COIL_COUNT], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut pins = [PinConfig::default(); COIL_COUNT];
    let mut count = 0;
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let slot = pins.get_mut(count).ok_or(ParseError::TooManyItems)?;
        *slot = parse_pin(item)?;
        count += 1;
    }

    if count != COIL_COUNT {
        return Err(ParseError::InvalidValue);
    }
    Ok(pins)
}

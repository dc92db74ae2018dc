//! Build script for splitflap-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates flaps.toml at compile time

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Must match splitflap_core::config::MAX_MODULES
const MAX_MODULES: usize = 8;

/// Printed flaps: blank plus ten digits
const MIN_FLAP_COUNT: i64 = 11;

/// User GPIOs on the RP2040
const GPIO_COUNT: u8 = 30;

const MODULE_KEYS: &[&str] = &[
    "coil_pins",
    "home_pin",
    "steps_per_flip",
    "flap_count",
    "offset",
    "reversed",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x"))
        .expect("failed to copy memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate flaps.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=flaps.toml");

    let config_path = Path::new("flaps.toml");
    if !config_path.exists() {
        fail(
            "flaps.toml not found!",
            &[
                "The firmware embeds flaps.toml from the".to_string(),
                "splitflap-firmware directory. Please create one.".to_string(),
            ],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read flaps.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in flaps.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    let mut pins: BTreeMap<u8, String> = BTreeMap::new();

    validate_display(&config, &mut errors);
    validate_bridge(&config, &mut errors, &mut pins);
    validate_modules(&config, &mut errors, &mut pins);

    if !errors.is_empty() {
        fail("Invalid configuration in flaps.toml", &errors);
    }

    println!("cargo:warning=flaps.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Parse "gpioNN" with optional "!" / "^" modifiers
fn parse_pin(value: &str) -> Option<u8> {
    let pin: u8 = value.trim_start_matches(['!', '^']).strip_prefix("gpio")?.parse().ok()?;
    (pin < GPIO_COUNT).then_some(pin)
}

/// Record a pin, flagging values that are malformed or used twice
fn claim_pin(
    value: Option<&toml::Value>,
    owner: String,
    errors: &mut Vec<String>,
    pins: &mut BTreeMap<u8, String>,
) {
    let Some(value) = value else {
        errors.push(format!("{} missing", owner));
        return;
    };
    let Some(pin) = value.as_str().and_then(parse_pin) else {
        errors.push(format!("{} must be \"gpio0\"..\"gpio29\"", owner));
        return;
    };
    if let Some(previous) = pins.insert(pin, owner.clone()) {
        errors.push(format!("gpio{} used by {} and {}", pin, previous, owner));
    }
}

fn check_int(
    table: &toml::Table,
    key: &str,
    section: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if range.contains(v) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be {}..={}",
            section,
            key,
            range.start(),
            range.end()
        )),
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };

    for key in display.keys() {
        if key != "step_interval_us" && key != "homing_limit" {
            errors.push(format!("[display] unknown key '{}'", key));
        }
    }
    check_int(display, "step_interval_us", "display", 1..=u32::MAX as i64, errors);
    check_int(display, "homing_limit", "display", 1..=u32::MAX as i64, errors);
}

fn validate_bridge(
    config: &toml::Value,
    errors: &mut Vec<String>,
    pins: &mut BTreeMap<u8, String>,
) {
    let Some(bridge) = config.get("bridge").and_then(|b| b.as_table()) else {
        // Defaults to gpio0/gpio1
        pins.insert(0, "[bridge] tx_pin".to_string());
        pins.insert(1, "[bridge] rx_pin".to_string());
        return;
    };

    for key in bridge.keys() {
        if !["tx_pin", "rx_pin", "baud_rate"].contains(&key.as_str()) {
            errors.push(format!("[bridge] unknown key '{}'", key));
        }
    }
    claim_pin(bridge.get("tx_pin"), "[bridge] tx_pin".into(), errors, pins);
    claim_pin(bridge.get("rx_pin"), "[bridge] rx_pin".into(), errors, pins);
    check_int(bridge, "baud_rate", "bridge", 1_200..=921_600, errors);
}

fn validate_modules(
    config: &toml::Value,
    errors: &mut Vec<String>,
    pins: &mut BTreeMap<u8, String>,
) {
    let modules = match config.get("module") {
        Some(toml::Value::Table(t)) if !t.is_empty() => t,
        _ => {
            errors.push("Missing [module.*] section - at least one module is required".into());
            return;
        }
    };

    if modules.len() > MAX_MODULES {
        errors.push(format!("At most {} modules are supported", MAX_MODULES));
    }

    for (name, module) in modules {
        let section = format!("module.{}", name);
        let Some(module) = module.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for key in module.keys() {
            if !MODULE_KEYS.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }

        match module.get("coil_pins") {
            Some(toml::Value::Array(coils)) if coils.len() == 4 => {
                for (i, coil) in coils.iter().enumerate() {
                    let owner = format!("[{}] coil_pins[{}]", section, i);
                    claim_pin(Some(coil), owner, errors, pins);
                }
            }
            Some(_) => errors.push(format!("[{}] coil_pins must list 4 pins", section)),
            None => errors.push(format!("[{}] missing 'coil_pins'", section)),
        }
        claim_pin(
            module.get("home_pin"),
            format!("[{}] home_pin", section),
            errors,
            pins,
        );

        check_int(module, "steps_per_flip", &section, 1..=u16::MAX as i64, errors);
        check_int(module, "flap_count", &section, MIN_FLAP_COUNT..=u8::MAX as i64, errors);
        check_int(module, "offset", &section, 0..=u8::MAX as i64, errors);

        if let Some(reversed) = module.get("reversed") {
            if !reversed.is_bool() {
                errors.push(format!("[{}] reversed must be true or false", section));
            }
        }
    }
}

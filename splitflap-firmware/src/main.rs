//! Splitflap - Split-Flap Counter Firmware
//!
//! Main firmware binary for RP2040-based split-flap displays. Every module
//! is a 28BYJ-48 stepper on a ULN2003 board with a hall sensor marking the
//! home flap. A browser reaches the controller through a transparent
//! serial WiFi bridge on one of the UARTs.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::BufferedInterruptHandler;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use splitflap_core::dispatch::CommandDispatcher;
use splitflap_core::display::DisplayController;
use splitflap_hal::DelayClock;
use splitflap_hal_rp2040::pins::{PinBank, PinBankPeripherals};
use splitflap_hal_rp2040::uart::new_bridge_uart;

mod board;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Splitflap firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // The bridge needs typed pins, so it is set up before the pin bank
    let (mut pins, remaining) = PinBankPeripherals::from_peripherals(p);
    let tx_buf = TX_BUF.init([0u8; 1024]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = match new_bridge_uart(&mut pins, remaining, &config.bridge, Irqs, tx_buf, rx_buf) {
        Ok(uart) => uart,
        Err(e) => {
            error!("Bridge UART setup failed: {:?}", e);
            return;
        }
    };
    info!(
        "Bridge UART on gpio{}/gpio{} at {} baud",
        config.bridge.tx_pin, config.bridge.rx_pin, config.bridge.baud_rate
    );

    let mut bank = PinBank::new(pins);
    let modules = match board::build_modules(&config, &mut bank) {
        Ok(modules) => modules,
        Err(e) => {
            error!("Module pin setup failed: {:?}", e);
            return;
        }
    };
    info!("{} flap modules initialized", modules.len());

    let clock = DelayClock::new(Delay, config.step_interval_us);
    let mut dispatcher = CommandDispatcher::new(DisplayController::new(modules, clock));

    // Home every module and show 0 before accepting requests
    match dispatcher.start() {
        Ok(boot) => {
            info!(
                "Boot complete: {} modules homed, {} steps to show 0",
                boot.resync.homed, boot.render.steps
            );
            if !boot.resync.all_found() {
                warn!(
                    "Homing failsafe on modules {=u8:b}, positions unverified",
                    boot.resync.failsafe_mask
                );
            }
        }
        Err(e) => error!("Initial render failed: {:?}", e),
    }

    spawner.spawn(tasks::bridge_task(dispatcher, uart)).unwrap();

    info!("Bridge task spawned, firmware running");
}

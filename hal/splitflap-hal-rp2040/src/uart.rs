//! UART setup for the serial WiFi bridge
//!
//! RP2040 has two UART peripherals, each reachable on a fixed set of
//! GPIO pairs. The bridge pins come from config, so they are resolved
//! here to the typed pins embassy-rp needs.

use embassy_rp::interrupt::typelevel::{Binding, UART0_IRQ, UART1_IRQ};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig, Uart};
use splitflap_core::config::BridgeConfig;

use crate::pins::{PinBankPeripherals, RemainingPeripherals};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Direction a GPIO can take on its UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartRole {
    Tx,
    Rx,
}

/// Errors resolving the bridge UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Pin has no UART function in the required direction
    NotUartPin(u8),
    /// TX and RX belong to different UARTs
    Mismatch,
    /// Pin was already taken
    PinTaken(u8),
}

/// Determine which UART function a GPIO carries
pub fn gpio_to_uart(gpio: u8) -> Option<(UartId, UartRole)> {
    // UART0: TX 0/12/16/28, RX 1/13/17/29
    // UART1: TX 4/8/20/24, RX 5/9/21/25
    match gpio {
        0 | 12 | 16 | 28 => Some((UartId::Uart0, UartRole::Tx)),
        1 | 13 | 17 | 29 => Some((UartId::Uart0, UartRole::Rx)),
        4 | 8 | 20 | 24 => Some((UartId::Uart1, UartRole::Tx)),
        5 | 9 | 21 | 25 => Some((UartId::Uart1, UartRole::Rx)),
        _ => None,
    }
}

/// Check that `tx`/`rx` form a usable pair and return their UART
pub fn bridge_uart_id(tx: u8, rx: u8) -> Result<UartId, UartError> {
    let (tx_uart, tx_role) = gpio_to_uart(tx).ok_or(UartError::NotUartPin(tx))?;
    let (rx_uart, rx_role) = gpio_to_uart(rx).ok_or(UartError::NotUartPin(rx))?;
    if tx_role != UartRole::Tx {
        return Err(UartError::NotUartPin(tx));
    }
    if rx_role != UartRole::Rx {
        return Err(UartError::NotUartPin(rx));
    }
    if tx_uart != rx_uart {
        return Err(UartError::Mismatch);
    }
    Ok(tx_uart)
}

/// Build the buffered bridge UART from configured pins
///
/// The pins are taken out of `pins`, so they are no longer available to
/// the [`PinBank`](crate::pins::PinBank) built afterwards.
pub fn new_bridge_uart<I>(
    pins: &mut PinBankPeripherals,
    uarts: RemainingPeripherals,
    config: &BridgeConfig,
    irqs: I,
    tx_buf: &'static mut [u8],
    rx_buf: &'static mut [u8],
) -> Result<BufferedUart, UartError>
where
    I: Binding<UART0_IRQ, BufferedInterruptHandler<UART0>>
        + Binding<UART1_IRQ, BufferedInterruptHandler<UART1>>,
{
    bridge_uart_id(config.tx_pin, config.rx_pin)?;

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.baud_rate;

    macro_rules! buffered {
        ($uart:expr, $tx:ident, $rx:ident) => {{
            let tx = pins.$tx.take().ok_or(UartError::PinTaken(config.tx_pin))?;
            let rx = pins.$rx.take().ok_or(UartError::PinTaken(config.rx_pin))?;
            Uart::new_blocking($uart, tx, rx, uart_config).into_buffered(irqs, tx_buf, rx_buf)
        }};
    }

    let uart = match (config.tx_pin, config.rx_pin) {
        (0, 1) => buffered!(uarts.uart0, pin0, pin1),
        (12, 13) => buffered!(uarts.uart0, pin12, pin13),
        (16, 17) => buffered!(uarts.uart0, pin16, pin17),
        (28, 29) => buffered!(uarts.uart0, pin28, pin29),
        (4, 5) => buffered!(uarts.uart1, pin4, pin5),
        (8, 9) => buffered!(uarts.uart1, pin8, pin9),
        (20, 21) => buffered!(uarts.uart1, pin20, pin21),
        (24, 25) => buffered!(uarts.uart1, pin24, pin25),
        // Same UART but pins from different pairs
        _ => return Err(UartError::Mismatch),
    };

    Ok(uart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_uart() {
        assert_eq!(gpio_to_uart(0), Some((UartId::Uart0, UartRole::Tx)));
        assert_eq!(gpio_to_uart(9), Some((UartId::Uart1, UartRole::Rx)));
        assert_eq!(gpio_to_uart(2), None);
    }

    #[test]
    fn test_bridge_uart_id() {
        assert_eq!(bridge_uart_id(0, 1), Ok(UartId::Uart0));
        assert_eq!(bridge_uart_id(8, 9), Ok(UartId::Uart1));
        assert_eq!(bridge_uart_id(1, 0), Err(UartError::NotUartPin(1)));
        assert_eq!(bridge_uart_id(0, 5), Err(UartError::Mismatch));
        assert_eq!(bridge_uart_id(3, 1), Err(UartError::NotUartPin(3)));
    }
}

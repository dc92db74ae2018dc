//! Serial bridge task
//!
//! Reads the raw HTTP stream forwarded by the WiFi bridge, frames it into
//! requests and answers each one. Motion runs inside `dispatch`, so the
//! next request waits in the UART buffer until the wheels have stopped.

use defmt::*;
use embassy_rp::uart::BufferedUart;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};

use splitflap_core::dispatch::{Activity, Handled};
use splitflap_protocol::{Reply, RequestParser, MAX_RESPONSE_SIZE, REQUEST_TIMEOUT_MS};

use crate::board::Dispatcher;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Bridge task - owns the dispatcher for the lifetime of the firmware
#[embassy_executor::task]
pub async fn bridge_task(mut dispatcher: Dispatcher, mut uart: BufferedUart) {
    info!("Bridge task started");

    let mut parser = RequestParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];
    let mut out = [0u8; MAX_RESPONSE_SIZE];

    loop {
        // Mid-request silence means the client went away
        let read = if parser.is_idle() {
            Ok(uart.read(&mut buf).await)
        } else {
            with_timeout(Duration::from_millis(REQUEST_TIMEOUT_MS), uart.read(&mut buf)).await
        };

        let n = match read {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                warn!("UART read error: {:?}", e);
                parser.reset();
                continue;
            }
            Err(_) => {
                debug!("Request stalled, dropping partial request");
                parser.reset();
                continue;
            }
        };
        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            let reply = match parser.feed(byte) {
                Ok(Some(request)) => {
                    if request.is_motion() {
                        debug!("Motion request: {:?}", request);
                    } else {
                        trace!("Request: {:?}", request);
                    }
                    let handled = dispatcher.dispatch(request);
                    log_activity(&handled);
                    handled.reply
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!("Request framing error: {:?}", e);
                    Reply::NotFound
                }
            };

            send_reply(&mut uart, &reply, &mut out).await;
        }
    }
}

/// Encode and send one reply
async fn send_reply(uart: &mut BufferedUart, reply: &Reply, out: &mut [u8]) {
    let len = match reply.encode(out) {
        Ok(len) => len,
        Err(e) => {
            warn!("Failed to encode {:?}: {:?}", reply, e);
            return;
        }
    };

    match uart.write_all(&out[..len]).await {
        Ok(()) => trace!("Sent {} ({} bytes)", reply.status().0, len),
        Err(e) => warn!("UART write error: {:?}", e),
    }
}

fn log_activity(handled: &Handled) {
    match handled.activity {
        Activity::Idle => {}
        Activity::Rendered(report) => info!(
            "Rendered: modules {=u8:b} moved, {} steps",
            report.moved_mask, report.steps
        ),
        Activity::Refused(e) => warn!("Render refused: {:?}", e),
        Activity::Resynced(report) => {
            if report.all_found() {
                info!("Resync: {} modules homed", report.homed);
            } else {
                warn!(
                    "Resync: homing failsafe on modules {=u8:b}",
                    report.failsafe_mask
                );
            }
        }
    }
}

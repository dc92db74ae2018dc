//! Control endpoint protocol
//!
//! This crate defines the minimal HTTP/1.0 dialect spoken between a browser
//! (through a transparent serial WiFi bridge) and the split-flap controller.
//! Only the request target matters; headers are skipped and bodies discarded.
//!
//! # Protocol Overview
//!
//! ```text
//! GET /inc HTTP/1.0      ──►  Request::Increment  ──►  303 See Other, Location: /
//! GET /sync HTTP/1.0     ──►  Request::Resync     ──►  303 See Other, Location: /
//! GET / HTTP/1.0         ──►  Request::Root       ──►  200 OK + control page
//! anything else          ──►  Request::Unknown    ──►  404 Not Found
//! ```
//!
//! The controller is a "dumb endpoint": it never keeps a connection open and
//! answers every request with exactly one response.

#![no_std]
#![deny(unsafe_code)]

pub mod page;
pub mod parser;
pub mod request;
pub mod response;

pub use parser::{ParseError, RequestParser, MAX_LINE_LEN, REQUEST_TIMEOUT_MS};
pub use request::Request;
pub use response::{EncodeError, Reply, MAX_RESPONSE_SIZE};

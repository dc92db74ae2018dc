//! Response encoding
//!
//! Every request is answered with exactly one HTTP/1.0 response. The
//! connection is closed by the bridge after the response, so no keep-alive
//! handling is needed.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::page::write_control_page;

/// Maximum encoded response size in bytes
pub const MAX_RESPONSE_SIZE: usize = 1024;

/// Maximum body size in bytes
const MAX_BODY_SIZE: usize = 768;

/// Errors that can occur while encoding a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Buffer too small for the encoded response
    BufferTooSmall,
}

impl From<fmt::Error> for EncodeError {
    fn from(_: fmt::Error) -> Self {
        EncodeError::BufferTooSmall
    }
}

/// Response to a control request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Action done; send the browser back to the control page
    Redirect,
    /// Control page with the current count
    ControlPage {
        /// Counter value to show
        count: u32,
    },
    /// Requested resource does not exist
    NotFound,
    /// Flaps have not been homed yet, motion was refused
    NotReady,
}

impl Reply {
    /// HTTP status code and reason phrase
    pub fn status(&self) -> (u16, &'static str) {
        match self {
            Reply::Redirect => (303, "See Other"),
            Reply::ControlPage { .. } => (200, "OK"),
            Reply::NotFound => (404, "Not Found"),
            Reply::NotReady => (503, "Service Unavailable"),
        }
    }

    /// Check if this reply reports success
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Redirect | Reply::ControlPage { .. })
    }

    /// Encode this reply into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let mut body: String<MAX_BODY_SIZE> = String::new();
        match self {
            Reply::ControlPage { count } => write_control_page(&mut body, *count)?,
            Reply::NotFound => body.push_str("Not found.").map_err(|_| EncodeError::BufferTooSmall)?,
            Reply::NotReady => body
                .push_str("Flaps not homed yet, try /sync.")
                .map_err(|_| EncodeError::BufferTooSmall)?,
            Reply::Redirect => {}
        }

        let (code, reason) = self.status();
        let mut out = SliceWriter::new(buffer);

        write!(out, "HTTP/1.0 {} {}\r\n", code, reason)?;
        match self {
            Reply::Redirect => write!(out, "Location: /\r\n")?,
            Reply::ControlPage { .. } => write!(out, "Content-Type: text/html\r\n")?,
            Reply::NotFound | Reply::NotReady => write!(out, "Content-Type: text/plain\r\n")?,
        }
        write!(out, "Content-Length: {}\r\nConnection: close\r\n\r\n", body.len())?;
        out.write_str(&body)?;

        Ok(out.len())
    }

    /// Encode this reply into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_RESPONSE_SIZE>, EncodeError> {
        let mut buffer = [0u8; MAX_RESPONSE_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| EncodeError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// `fmt::Write` adapter over a fixed byte buffer
struct SliceWriter<'a> {
    buffer: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    fn len(&self) -> usize {
        self.pos
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.pos + bytes.len();
        if end > self.buffer.len() {
            return Err(fmt::Error);
        }
        self.buffer[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

//! Byte-fed request framing
//!
//! The serial bridge forwards the raw TCP stream, so request boundaries have
//! to be recovered from the bytes themselves:
//!
//! - REQUEST LINE: everything up to the first `\n` (a trailing `\r` is dropped)
//! - HEADERS: skipped line by line until an empty line, noting `Content-Length`
//! - BODY: `Content-Length` bytes, discarded
//!
//! A request line without an HTTP version (`GET /inc`) is an HTTP/0.9 simple
//! request and has no header block, so it completes immediately.
//!
//! The stream has no connection boundaries, so a client that drops halfway
//! through a request leaves a fragment behind. A request line that is not
//! well formed is resynchronised on its last method token, and a request
//! line arriving where a header was expected starts a new request.

use core::str;

use heapless::Vec;

use crate::request::Request;

/// Maximum request line length in bytes
pub const MAX_LINE_LEN: usize = 128;

/// Silence on the wire after which a half-received request is dropped
pub const REQUEST_TIMEOUT_MS: u64 = 100;

/// Method tokens a request line may start with
const METHODS: [&str; 7] = ["GET", "HEAD", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"];

/// Errors that can occur while framing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Request line exceeds [`MAX_LINE_LEN`]
    LineTooLong,
    /// Request line is not valid UTF-8
    InvalidEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Collecting the request line
    RequestLine,
    /// Discarding the rest of an over-long request line
    Overflow,
    /// Skipping header lines, waiting for the blank line
    Headers {
        /// Request classified from the request line
        request: Request,
        /// Bytes seen on the current header line (excluding `\r`)
        line_len: usize,
        /// Body length announced so far
        content_length: usize,
    },
    /// Discarding the request body
    Body {
        /// Body bytes still to skip
        remaining: usize,
    },
}

/// State machine for framing incoming requests
#[derive(Debug, Clone)]
pub struct RequestParser {
    state: ParseState,
    line: Vec<u8, MAX_LINE_LEN>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    /// Create a new request parser
    pub fn new() -> Self {
        Self {
            state: ParseState::RequestLine,
            line: Vec::new(),
        }
    }

    /// Reset the parser state
    ///
    /// Called after a transport fault or a stall so that a half-received
    /// request does not bleed into the next one.
    pub fn reset(&mut self) {
        self.state = ParseState::RequestLine;
        self.line.clear();
    }

    /// Check if the parser is between requests
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::RequestLine && self.line.is_empty()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(request))` when a complete request has been framed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a framing error.
    /// After an error the parser skips to the end of the offending line.
    ///
    /// A request is reported as soon as its header block ends; any body that
    /// follows is swallowed before the next request line is read.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Request>, ParseError> {
        match self.state {
            ParseState::RequestLine => match byte {
                b'\n' => self.finish_request_line(),
                b'\r' => Ok(None),
                _ => {
                    if self.line.push(byte).is_err() {
                        self.line.clear();
                        self.state = ParseState::Overflow;
                        return Err(ParseError::LineTooLong);
                    }
                    Ok(None)
                }
            },
            ParseState::Overflow => {
                if byte == b'\n' {
                    self.reset();
                }
                Ok(None)
            }
            ParseState::Headers {
                request,
                line_len,
                content_length,
            } => match byte {
                b'\n' => self.finish_header_line(request, line_len, content_length),
                b'\r' => Ok(None),
                _ => {
                    // Over-long header lines are truncated; only short ones matter
                    let _ = self.line.push(byte);
                    self.state = ParseState::Headers {
                        request,
                        line_len: line_len.saturating_add(1),
                        content_length,
                    };
                    Ok(None)
                }
            },
            ParseState::Body { remaining } => {
                if remaining <= 1 {
                    self.reset();
                } else {
                    self.state = ParseState::Body {
                        remaining: remaining - 1,
                    };
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete request and the number of bytes consumed,
    /// so the caller can continue with the remainder.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(Option<Request>, usize), ParseError> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(request) = self.feed(byte)? {
                return Ok((Some(request), i + 1));
            }
        }
        Ok((None, bytes.len()))
    }

    fn finish_request_line(&mut self) -> Result<Option<Request>, ParseError> {
        // Tolerate stray blank lines between requests
        if self.line.is_empty() {
            return Ok(None);
        }

        let line = match str::from_utf8(&self.line) {
            Ok(line) => resync_request_line(line),
            Err(_) => {
                self.reset();
                return Err(ParseError::InvalidEncoding);
            }
        };

        let request = Request::from_request_line(line);
        let has_version = line.split_ascii_whitespace().nth(2).is_some();
        self.line.clear();

        if has_version {
            self.state = ParseState::Headers {
                request,
                line_len: 0,
                content_length: 0,
            };
            Ok(None)
        } else {
            self.state = ParseState::RequestLine;
            Ok(Some(request))
        }
    }

    fn finish_header_line(
        &mut self,
        request: Request,
        line_len: usize,
        content_length: usize,
    ) -> Result<Option<Request>, ParseError> {
        if line_len == 0 {
            self.line.clear();
            self.state = if content_length > 0 {
                ParseState::Body {
                    remaining: content_length,
                }
            } else {
                ParseState::RequestLine
            };
            return Ok(Some(request));
        }

        let complete = line_len == self.line.len();
        let header = if complete {
            str::from_utf8(&self.line).ok()
        } else {
            None
        };

        match header {
            // The previous request was cut short; this line opens the next one
            Some(line) if is_request_line(line) => {
                self.state = ParseState::RequestLine;
                self.finish_request_line()
            }
            Some(line) => {
                let content_length = parse_content_length(line).unwrap_or(content_length);
                self.line.clear();
                self.state = ParseState::Headers {
                    request,
                    line_len: 0,
                    content_length,
                };
                Ok(None)
            }
            None => {
                self.line.clear();
                self.state = ParseState::Headers {
                    request,
                    line_len: 0,
                    content_length,
                };
                Ok(None)
            }
        }
    }
}

/// Check that a line has the shape `METHOD target [HTTP/x.y]`
fn is_request_line(line: &str) -> bool {
    let mut parts = line.split_ascii_whitespace();

    let method_ok = parts.next().is_some_and(|m| METHODS.contains(&m));
    let target_ok = parts.next().is_some();
    let version_ok = match parts.next() {
        Some(version) => version.starts_with("HTTP/"),
        None => true,
    };

    method_ok && target_ok && version_ok && parts.next().is_none()
}

/// Drop a leading fragment left behind by an abandoned request
///
/// `GET /inGET /inc HTTP/1.1` becomes `GET /inc HTTP/1.1`. Lines that are
/// already well formed, or have no well-formed tail, are returned unchanged.
fn resync_request_line(line: &str) -> &str {
    if is_request_line(line) {
        return line;
    }

    METHODS
        .iter()
        .filter_map(|method| {
            line.match_indices(method)
                .map(|(pos, _)| pos)
                .filter(|&pos| pos > 0)
                .find(|&pos| is_request_line(&line[pos..]))
        })
        .max()
        .map_or(line, |pos| &line[pos..])
}

fn parse_content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse().ok()
}

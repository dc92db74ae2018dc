//! Request classification
//!
//! Maps an HTTP request line onto the handful of actions the controller
//! understands.

/// A classified control request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Advance the counter by one
    Increment,
    /// Re-home every flap module
    Resync,
    /// Show the control page
    Root,
    /// Anything the controller does not serve
    Unknown,
}

impl Request {
    /// Classify a request line such as `GET /inc HTTP/1.0`
    ///
    /// Only `GET` is served. The query string is ignored so that the
    /// parameterless forms on the control page (`/inc?`) still match.
    pub fn from_request_line(line: &str) -> Self {
        let mut parts = line.split_ascii_whitespace();

        let method = parts.next();
        let target = parts.next();

        match (method, target) {
            (Some("GET"), Some(target)) => Self::from_target(target),
            _ => Request::Unknown,
        }
    }

    /// Classify a request target (path with optional query)
    pub fn from_target(target: &str) -> Self {
        let path = match target.find('?') {
            Some(pos) => &target[..pos],
            None => target,
        };

        match path {
            "/" | "" => Request::Root,
            "/inc" | "/increment" => Request::Increment,
            "/sync" | "/resync" => Request::Resync,
            _ => Request::Unknown,
        }
    }

    /// Check if this request moves the flaps
    pub fn is_motion(&self) -> bool {
        matches!(self, Request::Increment | Request::Resync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_paths() {
        assert_eq!(
            Request::from_request_line("GET /inc HTTP/1.1"),
            Request::Increment
        );
        assert_eq!(
            Request::from_request_line("GET /increment HTTP/1.0"),
            Request::Increment
        );
        assert_eq!(
            Request::from_request_line("GET /sync HTTP/1.1"),
            Request::Resync
        );
        assert_eq!(
            Request::from_request_line("GET /resync HTTP/1.1"),
            Request::Resync
        );
        assert_eq!(Request::from_request_line("GET / HTTP/1.1"), Request::Root);
    }

    #[test]
    fn test_query_string_ignored() {
        // Submitting a form without fields appends a bare '?'
        assert_eq!(Request::from_target("/inc?"), Request::Increment);
        assert_eq!(Request::from_target("/sync?x=1"), Request::Resync);
        assert_eq!(Request::from_target("/?"), Request::Root);
    }

    #[test]
    fn test_http09_request_line() {
        assert_eq!(Request::from_request_line("GET /inc"), Request::Increment);
    }

    #[test]
    fn test_unknown_requests() {
        assert_eq!(
            Request::from_request_line("GET /favicon.ico HTTP/1.1"),
            Request::Unknown
        );
        assert_eq!(
            Request::from_request_line("POST /inc HTTP/1.1"),
            Request::Unknown
        );
        // Prefix match must not leak through
        assert_eq!(
            Request::from_request_line("GET /incoming HTTP/1.1"),
            Request::Unknown
        );
        assert_eq!(Request::from_request_line(""), Request::Unknown);
        assert_eq!(Request::from_request_line("GET"), Request::Unknown);
    }

    #[test]
    fn test_is_motion() {
        assert!(Request::Increment.is_motion());
        assert!(Request::Resync.is_motion());
        assert!(!Request::Root.is_motion());
        assert!(!Request::Unknown.is_motion());
    }
}

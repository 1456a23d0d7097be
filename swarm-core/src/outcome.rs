use crate::SUCCESS_STATUS;
use std::fmt;
use std::time::Duration;

/// Result classification of a single request attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The target answered with this HTTP status code.
    Http(u16),
    /// No status was received: timeout, refused connection, DNS failure, ...
    TransportError,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Http(SUCCESS_STATUS))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Http(code) => write!(f, "{code}"),
            Status::TransportError => write!(f, "transport_error"),
        }
    }
}

/// Record of one completed request, handed from a request task to the aggregator.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOutcome {
    pub id: u64,
    pub status: Status,
    pub elapsed: Duration,
    pub error: Option<String>,
}

impl RequestOutcome {
    pub fn http(id: u64, code: u16, elapsed: Duration) -> Self {
        Self {
            id,
            status: Status::Http(code),
            elapsed,
            error: None,
        }
    }

    pub fn transport_error(id: u64, elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            id,
            status: Status::TransportError,
            elapsed,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(Status::Http(200).is_success());
        assert!(!Status::Http(201).is_success());
        assert!(!Status::Http(500).is_success());
        assert!(!Status::TransportError.is_success());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Http(404).to_string(), "404");
        assert_eq!(Status::TransportError.to_string(), "transport_error");
    }
}

//! Error category classification.
//!
//! Categories drive retry decisions and the wording shown to a caller.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout, dropped stream.
    /// Generally transient and retryable.
    Network,

    /// The backend rejected the credentials (HTTP 401/403).
    Auth,

    /// Backend-side failure (HTTP 5xx, non-zero envelope code).
    Server,

    /// The request itself is wrong (invalid query, bad URL, 4xx).
    /// Not retryable: the caller has to change the request.
    Client,

    /// Missing or invalid configuration.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Map an HTTP status code to a category.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorCategory::Auth,
            400..=499 => ErrorCategory::Client,
            _ => ErrorCategory::Server,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Streaming-related error types.
//!
//! Errors surfaced by an SSE connection. Cancellation is deliberately absent:
//! a cancelled connection ends silently and never produces a `StreamError`.

use thiserror::Error;

use crate::traits::HttpError;

/// Failure of a single SSE connection.
///
/// Every variant is terminal: once one is reported the connection delivers
/// nothing further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The server answered the connect request with a non-success status.
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, message: String },

    /// The connect request failed before any response arrived.
    #[error("failed to connect to {url}: {message}")]
    Connect { url: String, message: String },

    /// The byte stream failed after the connection was open.
    #[error("stream connection lost: {message}")]
    ConnectionLost { message: String },

    /// The target URL could not be used.
    #[error("invalid stream URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl StreamError {
    /// Classify a transport failure that happened while connecting.
    ///
    /// Callers must filter out [`HttpError::Cancelled`] first.
    pub fn from_connect(url: &str, err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => {
                StreamError::HttpStatus { status, message }
            }
            HttpError::InvalidUrl(message) => StreamError::InvalidUrl {
                url: url.to_string(),
                message,
            },
            other => StreamError::Connect {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }

    /// Classify a transport failure that happened mid-stream.
    pub fn from_body(err: HttpError) -> Self {
        StreamError::ConnectionLost {
            message: err.to_string(),
        }
    }

    /// Status code of the failed connect, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            StreamError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if re-invoking the connection could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            StreamError::Connect { .. } | StreamError::ConnectionLost { .. } => true,
            StreamError::InvalidUrl { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::HttpStatus { status, .. } => {
                format!("The server refused the event stream (status {}).", status)
            }
            StreamError::Connect { .. } => {
                "Could not reach the server to open the event stream.".to_string()
            }
            StreamError::ConnectionLost { .. } => {
                "Connection to the server was lost while streaming.".to_string()
            }
            StreamError::InvalidUrl { url, .. } => format!("'{}' is not a valid stream URL.", url),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::HttpStatus { .. } => "STREAM_HTTP_STATUS",
            StreamError::Connect { .. } => "STREAM_CONNECT",
            StreamError::ConnectionLost { .. } => "STREAM_CONNECTION_LOST",
            StreamError::InvalidUrl { .. } => "STREAM_INVALID_URL",
        }
    }
}

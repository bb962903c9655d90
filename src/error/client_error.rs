//! Unified error type for the client.

use thiserror::Error;

use super::category::ErrorCategory;
use super::query::QueryError;
use super::stream::StreamError;
use crate::traits::HttpError;

/// Type alias for Results using [`ClientError`].
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified error type for request and streaming operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure or non-success HTTP status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// SSE connection failure.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The search request was rejected before being sent.
    #[error("invalid search request: {0}")]
    Query(#[from] QueryError),

    /// Request or response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-zero envelope code.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Http(err) => match err {
                HttpError::ServerError { status, .. } => ErrorCategory::from_status(*status),
                HttpError::InvalidUrl(_) => ErrorCategory::Client,
                _ => ErrorCategory::Network,
            },
            ClientError::Stream(err) => match err {
                StreamError::HttpStatus { status, .. } => ErrorCategory::from_status(*status),
                StreamError::InvalidUrl { .. } => ErrorCategory::Client,
                StreamError::Connect { .. } | StreamError::ConnectionLost { .. } => {
                    ErrorCategory::Network
                }
            },
            ClientError::Query(_) => ErrorCategory::Client,
            ClientError::Json(_) => ErrorCategory::Server,
            ClientError::Api { .. } => ErrorCategory::Server,
            ClientError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Stream(err) => err.is_retryable(),
            ClientError::Http(HttpError::Cancelled) => false,
            ClientError::Api { .. } | ClientError::Json(_) => false,
            other => other.category().is_retryable(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Http(_) => "HTTP",
            ClientError::Stream(err) => err.error_code(),
            ClientError::Query(err) => err.error_code(),
            ClientError::Json(_) => "JSON",
            ClientError::Api { .. } => "API",
            ClientError::Config(_) => "CONFIG",
        }
    }
}

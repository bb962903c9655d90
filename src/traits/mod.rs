//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP operations (GET, POST, PUT, DELETE, streaming GET)
//! - [`SseHandler`](crate::sse::SseHandler) - SSE subscriber, in [`crate::sse`]

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};

//! Mock implementations for testing.
//!
//! Unit and integration tests use these to exercise the client without
//! network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};

#![allow(dead_code)]

//! Mock transport fixtures.

pub use console_client::adapters::mock::{MockHttpClient, MockResponse};
pub use console_client::traits::{Headers, HttpError, Response};

use bytes::Bytes;
use std::sync::Arc;

use super::SSE_URL;

fn chunks(parts: &[&str]) -> Vec<Bytes> {
    parts.iter().map(|p| Bytes::from(p.to_string())).collect()
}

/// A client serving `parts` as separate chunks at [`SSE_URL`].
pub fn mock_stream(parts: &[&str]) -> Arc<MockHttpClient> {
    with_response(MockResponse::Stream(chunks(parts)))
}

/// A client serving `parts`, then holding the stream open forever.
pub fn stalled_stream(parts: &[&str]) -> Arc<MockHttpClient> {
    with_response(MockResponse::StalledStream(chunks(parts)))
}

/// A client serving `parts`, then failing with `error`.
pub fn failing_stream(parts: &[&str], error: HttpError) -> Arc<MockHttpClient> {
    with_response(MockResponse::StreamThenError(chunks(parts), error))
}

/// A client answering the connect with `status`.
pub fn status_response(status: u16, body: &str) -> Arc<MockHttpClient> {
    with_response(MockResponse::Success(Response::new(
        status,
        Bytes::from(body.to_string()),
    )))
}

pub fn with_response(response: MockResponse) -> Arc<MockHttpClient> {
    let client = MockHttpClient::new();
    client.set_response(SSE_URL, response);
    Arc::new(client)
}

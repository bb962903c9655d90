#![allow(dead_code)]

//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{mock_stream, Recorder, SSE_URL};
//!
//! let client = mock_stream(&["data: hi\n"]);
//! let recorder = Recorder::default();
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::{Arc, Mutex};

use console_client::error::StreamError;
use console_client::sse::SseHandler;

/// URL used by mock-backed SSE tests.
pub const SSE_URL: &str = "http://mock.test/api/stream";

/// A callback observed by [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open,
    Message { data: String, event_type: String },
    Error(StreamError),
    Complete,
}

impl Call {
    pub fn message(data: &str, event_type: &str) -> Self {
        Call::Message {
            data: data.to_string(),
            event_type: event_type.to_string(),
        }
    }
}

/// SSE handler that records every callback in order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SseHandler for Recorder {
    fn on_open(&mut self) {
        self.push(Call::Open);
    }

    fn on_message(&mut self, data: &str, event_type: &str) {
        self.push(Call::message(data, event_type));
    }

    fn on_error(&mut self, error: &StreamError) {
        self.push(Call::Error(error.clone()));
    }

    fn on_complete(&mut self) {
        self.push(Call::Complete);
    }
}

//! Events and states of an SSE connection.

use std::fmt;

use super::decoder::SseMessage;
use crate::error::StreamError;

/// One step of an SSE connection, in delivery order.
///
/// A connection yields `Open` at most once, then any number of `Message`s,
/// then exactly one of `Error` or `Complete`. A cancelled connection simply
/// stops.
#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    Open,
    Message(SseMessage),
    Error(StreamError),
    Complete,
}

impl SseEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SseEvent::Error(_) | SseEvent::Complete)
    }
}

/// Lifecycle state of an SSE connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SseState {
    #[default]
    Idle,
    Connecting,
    Open,
    Streaming,
    Complete,
    Errored,
    Cancelled,
}

impl SseState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SseState::Complete | SseState::Errored | SseState::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SseState::Idle => "idle",
            SseState::Connecting => "connecting",
            SseState::Open => "open",
            SseState::Streaming => "streaming",
            SseState::Complete => "complete",
            SseState::Errored => "errored",
            SseState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

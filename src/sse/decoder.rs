//! Turns raw chunks into SSE messages.

use super::line::{parse_sse_line, LineBuffer, SseLine};

/// A decoded `data:` payload and the event name in effect when it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    pub data: String,
    /// Empty when the record carried no `event:` line.
    pub event_type: String,
}

impl SseMessage {
    pub fn new(data: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            event_type: event_type.into(),
        }
    }
}

/// Stateful decoder for one connection.
///
/// Every non-empty `data:` line yields a message immediately; consecutive
/// `data:` lines are not joined. An `event:` line names the messages that
/// follow until the next blank line.
#[derive(Debug, Default)]
pub struct SseDecoder {
    lines: LineBuffer,
    event_type: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line without its terminator.
    pub fn feed_line(&mut self, line: &str) -> Option<SseMessage> {
        match parse_sse_line(line) {
            SseLine::Event(name) => {
                self.event_type = name;
                None
            }
            SseLine::Data(data) if data.is_empty() => None,
            SseLine::Data(data) => Some(SseMessage {
                data,
                event_type: self.event_type.clone(),
            }),
            SseLine::Empty => {
                self.event_type.clear();
                None
            }
            SseLine::Other(_) => None,
        }
    }

    /// Feed a raw chunk, returning every message completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.lines.push(chunk);
        let mut messages = Vec::new();
        while let Some(line) = self.lines.next_line() {
            if let Some(message) = self.feed_line(&line) {
                messages.push(message);
            }
        }
        messages
    }

    /// Flush the unterminated tail at end of stream.
    pub fn finish(&mut self) -> Option<SseMessage> {
        let line = self.lines.take_remainder()?;
        self.feed_line(&line)
    }

    /// Event name currently in effect.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn reset(&mut self) {
        self.lines.clear();
        self.event_type.clear();
    }
}

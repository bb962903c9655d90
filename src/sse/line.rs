//! Line framing for SSE byte streams.

use bytes::BytesMut;

/// A single SSE line, classified by its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Blank line (end of a record)
    Empty,
    /// `event: <name>`, value trimmed
    Event(String),
    /// `data: <payload>`, value trimmed
    Data(String),
    /// Comment or any unrecognised line; ignored
    Other(String),
}

/// Classify one line. The line must not contain its terminator.
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    SseLine::Other(line.to_string())
}

/// Accumulates raw chunks and hands out complete lines.
///
/// Splitting happens on raw `\n` bytes, so a multi-byte character cut across
/// two chunks is reassembled before decoding. Each line is decoded as lossy
/// UTF-8 with a trailing `\r` removed.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
    /// Bytes already known to contain no `\n`.
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete line, if one is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buf[self.scanned..].iter().position(|b| *b == b'\n');
        match pos {
            Some(pos) => {
                let end = self.scanned + pos;
                let line = self.buf.split_to(end + 1);
                self.scanned = 0;
                Some(decode(&line[..end]))
            }
            None => {
                self.scanned = self.buf.len();
                None
            }
        }
    }

    /// Take whatever is left as a final, unterminated line.
    pub fn take_remainder(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.buf.is_empty() {
            return None;
        }
        let rest = self.buf.split();
        Some(decode(&rest))
    }

    /// Bytes waiting for a line terminator.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.scanned = 0;
    }
}

fn decode(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

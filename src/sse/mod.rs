//! Server-sent events client.
//!
//! Reads a `text/event-stream` response incrementally and decodes it into
//! `(data, event_type)` messages, tolerating chunk boundaries anywhere.
//! The wire format understood here:
//! - `event: <name>` names the messages that follow
//! - `data: <payload>` delivers one message when the payload is non-empty
//! - a blank line ends the record and clears the event name
//! - anything else is ignored
//!
//! # Module structure
//! - `line` - line classification and byte-level line framing
//! - `decoder` - stateful decoder from chunks to messages
//! - `events` - `SseEvent` results and connection states
//! - `cancel` - cancellation handle/signal pair
//! - `config` - connection config, callbacks and the `SseHandler` trait
//! - `stream` - the connection as a `Stream` of events
//! - `connection` - spawned, callback-driven connections
//! - `simple` - thin wrapper over `eventsource-client`

mod cancel;
mod config;
mod connection;
mod decoder;
mod events;
mod line;
mod simple;
mod stream;

pub use cancel::{cancellation, CancelSignal, CancellationHandle};
pub use config::{
    CompleteCallback, ErrorCallback, MessageCallback, OpenCallback, SseCallbacks, SseConfig,
    SseHandler,
};
pub use connection::{create_sse_connection, create_sse_connection_with, subscribe, SseConnection};
pub use decoder::{SseDecoder, SseMessage};
pub use events::{SseEvent, SseState};
pub use line::{parse_sse_line, LineBuffer, SseLine};
pub use simple::{create_simple_sse, SimpleEventSource};
pub use stream::{event_stream, request_headers};

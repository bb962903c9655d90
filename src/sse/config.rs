//! Connection configuration and subscriber callbacks.

use std::fmt;

use crate::error::StreamError;
use crate::traits::Headers;

/// Receives the events of one SSE connection.
///
/// Only `on_message` is required. Callbacks run on the connection's task and
/// should return quickly.
pub trait SseHandler: Send + 'static {
    fn on_open(&mut self) {}

    fn on_message(&mut self, data: &str, event_type: &str);

    fn on_error(&mut self, _error: &StreamError) {}

    fn on_complete(&mut self) {}
}

pub type OpenCallback = Box<dyn FnMut() + Send>;
pub type MessageCallback = Box<dyn FnMut(&str, &str) + Send>;
pub type ErrorCallback = Box<dyn FnMut(&StreamError) + Send>;
pub type CompleteCallback = Box<dyn FnMut() + Send>;

/// Closure slots implementing [`SseHandler`]. Unset slots do nothing.
#[derive(Default)]
pub struct SseCallbacks {
    on_open: Option<OpenCallback>,
    on_message: Option<MessageCallback>,
    on_error: Option<ErrorCallback>,
    on_complete: Option<CompleteCallback>,
}

impl SseCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_open = Some(Box::new(f));
        self
    }

    pub fn on_message(mut self, f: impl FnMut(&str, &str) + Send + 'static) -> Self {
        self.on_message = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&StreamError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for SseCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SseCallbacks")
            .field("on_open", &self.on_open.is_some())
            .field("on_message", &self.on_message.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl SseHandler for SseCallbacks {
    fn on_open(&mut self) {
        if let Some(f) = self.on_open.as_mut() {
            f();
        }
    }

    fn on_message(&mut self, data: &str, event_type: &str) {
        if let Some(f) = self.on_message.as_mut() {
            f(data, event_type);
        }
    }

    fn on_error(&mut self, error: &StreamError) {
        if let Some(f) = self.on_error.as_mut() {
            f(error);
        }
    }

    fn on_complete(&mut self) {
        if let Some(f) = self.on_complete.as_mut() {
            f();
        }
    }
}

/// Everything needed to open one SSE connection.
#[derive(Debug)]
pub struct SseConfig {
    pub url: String,
    /// Extra request headers; these override the default `Accept`.
    pub headers: Headers,
    pub callbacks: SseCallbacks,
}

impl SseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Headers::new(),
            callbacks: SseCallbacks::default(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_callbacks(mut self, callbacks: SseCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn on_open(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.callbacks = self.callbacks.on_open(f);
        self
    }

    pub fn on_message(mut self, f: impl FnMut(&str, &str) + Send + 'static) -> Self {
        self.callbacks = self.callbacks.on_message(f);
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&StreamError) + Send + 'static) -> Self {
        self.callbacks = self.callbacks.on_error(f);
        self
    }

    pub fn on_complete(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.callbacks = self.callbacks.on_complete(f);
        self
    }
}

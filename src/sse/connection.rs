//! Callback-driven SSE connections running on their own task.

use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use super::cancel::{cancellation, CancelSignal, CancellationHandle};
use super::config::{SseConfig, SseHandler};
use super::events::{SseEvent, SseState};
use super::stream::event_stream;
use crate::adapters::ReqwestHttpClient;
use crate::traits::{Headers, HttpClient};

/// Handle to a running SSE connection.
///
/// Exactly one handle exists per connection. Dropping it cancels the
/// connection; use [`SseConnection::join`] to wait for it instead.
#[derive(Debug)]
pub struct SseConnection {
    id: Uuid,
    url: String,
    cancel: CancellationHandle,
    state_rx: watch::Receiver<SseState>,
    task: Option<JoinHandle<()>>,
}

impl SseConnection {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop the connection. A callback already running when this is called
    /// may finish, but no further callback starts after it returns. Neither
    /// `on_error` nor `on_complete` fires for the cancellation.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(id = %self.id, "Cancelling SSE connection");
        }
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SseState {
        *self.state_rx.borrow()
    }

    /// Receiver for state changes, for use with `select!`.
    pub fn state_receiver(&self) -> watch::Receiver<SseState> {
        self.state_rx.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the connection to end and return its final state.
    pub async fn join(mut self) -> SseState {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(id = %self.id, "SSE task failed: {}", e);
            }
        }
        let state = *self.state_rx.borrow();
        state
    }
}

impl Drop for SseConnection {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Open an SSE connection with the default HTTP transport.
///
/// Returns immediately; all network and parsing work happens on a spawned
/// task, so this must be called within a tokio runtime.
pub fn create_sse_connection(config: SseConfig) -> SseConnection {
    create_sse_connection_with(Arc::new(ReqwestHttpClient::new()), config)
}

/// Open an SSE connection over `client`.
pub fn create_sse_connection_with(client: Arc<dyn HttpClient>, config: SseConfig) -> SseConnection {
    let SseConfig {
        url,
        headers,
        callbacks,
    } = config;
    subscribe(client, url, headers, callbacks)
}

/// Open an SSE connection delivering events to `handler`.
pub fn subscribe<H>(
    client: Arc<dyn HttpClient>,
    url: impl Into<String>,
    headers: Headers,
    handler: H,
) -> SseConnection
where
    H: SseHandler,
{
    let url = url.into();
    let id = Uuid::new_v4();
    let (cancel, signal) = cancellation();
    let (state_tx, state_rx) = watch::channel(SseState::Idle);

    let span = tracing::info_span!("sse", id = %id, url = %url);
    let task = tokio::spawn(
        run_connection(client, url.clone(), headers, handler, signal, state_tx).instrument(span),
    );

    SseConnection {
        id,
        url,
        cancel,
        state_rx,
        task: Some(task),
    }
}

async fn run_connection<H: SseHandler>(
    client: Arc<dyn HttpClient>,
    url: String,
    headers: Headers,
    mut handler: H,
    signal: CancelSignal,
    state_tx: watch::Sender<SseState>,
) {
    let set_state = |state: SseState| {
        tracing::debug!("SSE state -> {}", state);
        state_tx.send_replace(state);
    };

    set_state(SseState::Connecting);
    let events = event_stream(client, url, headers, signal.clone());
    futures::pin_mut!(events);

    while let Some(event) = events.next().await {
        if signal.is_cancelled() {
            break;
        }
        match event {
            SseEvent::Open => {
                tracing::info!("SSE connection open");
                set_state(SseState::Open);
                handler.on_open();
                set_state(SseState::Streaming);
            }
            SseEvent::Message(message) => {
                tracing::debug!(
                    event = %message.event_type,
                    len = message.data.len(),
                    "SSE message"
                );
                handler.on_message(&message.data, &message.event_type);
            }
            SseEvent::Error(error) => {
                tracing::warn!("SSE connection failed: {}", error);
                set_state(SseState::Errored);
                handler.on_error(&error);
                return;
            }
            SseEvent::Complete => {
                tracing::info!("SSE stream complete");
                set_state(SseState::Complete);
                handler.on_complete();
                return;
            }
        }
    }

    set_state(SseState::Cancelled);
}

//! Minimal SSE subscription on top of `eventsource-client`.
//!
//! Only unnamed (`message`) events are delivered and no custom headers can
//! be sent. The underlying client reconnects on its own. Prefer
//! [`create_sse_connection`](super::create_sse_connection) for new code.

use eventsource_client as es;
use es::Client;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::error::StreamError;

/// Handle to a simple event source. Closing or dropping it stops delivery.
#[derive(Debug)]
pub struct SimpleEventSource {
    url: String,
    task: JoinHandle<()>,
}

impl SimpleEventSource {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn close(&self) {
        self.task.abort();
    }

    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SimpleEventSource {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Subscribe to `url`, calling `on_message` with the data of every
/// non-empty `message` event.
///
/// Must be called within a tokio runtime.
pub fn create_simple_sse<F>(url: &str, mut on_message: F) -> Result<SimpleEventSource, StreamError>
where
    F: FnMut(&str) + Send + 'static,
{
    let client = es::ClientBuilder::for_url(url)
        .map_err(|e| StreamError::InvalidUrl {
            url: url.to_string(),
            message: format!("{:?}", e),
        })?
        .build();

    let target = url.to_string();
    let task = tokio::spawn(async move {
        let mut stream = client.stream();
        while let Some(item) = stream.next().await {
            match item {
                Ok(es::SSE::Event(ev)) => {
                    if ev.event_type == "message" && !ev.data.is_empty() {
                        on_message(&ev.data);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Event source error on {}: {:?}", target, e);
                }
            }
        }
        tracing::debug!("Event source for {} ended", target);
    });

    Ok(SimpleEventSource {
        url: url.to_string(),
        task,
    })
}

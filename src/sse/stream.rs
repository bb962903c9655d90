//! SSE connection exposed as a stream of [`SseEvent`]s.

use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use std::sync::Arc;

use super::cancel::CancelSignal;
use super::decoder::{SseDecoder, SseMessage};
use super::events::SseEvent;
use crate::error::StreamError;
use crate::traits::{ByteStream, Headers, HttpClient};

pub(crate) const ACCEPT_EVENT_STREAM: &str = "text/event-stream";

/// Default `Accept` header merged with caller headers. Caller headers win,
/// compared case-insensitively.
pub fn request_headers(extra: &Headers) -> Headers {
    let mut headers = Headers::new();
    if !extra.keys().any(|k| k.eq_ignore_ascii_case("accept")) {
        headers.insert("Accept".to_string(), ACCEPT_EVENT_STREAM.to_string());
    }
    headers.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    headers
}

enum Phase {
    Connect,
    Streaming(ByteStream),
    Finished,
    Done,
}

struct StreamState {
    client: Arc<dyn HttpClient>,
    url: String,
    headers: Headers,
    signal: CancelSignal,
    decoder: SseDecoder,
    pending: VecDeque<SseMessage>,
    phase: Phase,
}

/// Open `url` and yield its events.
///
/// The stream ends after `Error` or `Complete`, or silently as soon as
/// `signal` fires while awaiting the connect or the next chunk.
pub fn event_stream(
    client: Arc<dyn HttpClient>,
    url: String,
    headers: Headers,
    signal: CancelSignal,
) -> impl Stream<Item = SseEvent> + Send + 'static {
    let state = StreamState {
        client,
        url,
        headers: request_headers(&headers),
        signal,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        phase: Phase::Connect,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(message) = st.pending.pop_front() {
                return Some((SseEvent::Message(message), st));
            }

            match std::mem::replace(&mut st.phase, Phase::Done) {
                Phase::Connect => {
                    let result = tokio::select! {
                        biased;
                        _ = st.signal.cancelled() => return None,
                        result = st.client.get_stream(&st.url, &st.headers) => result,
                    };
                    match result {
                        Ok(body) => {
                            st.phase = Phase::Streaming(body);
                            return Some((SseEvent::Open, st));
                        }
                        Err(e) if e.is_cancelled() => return None,
                        Err(e) => {
                            let error = StreamError::from_connect(&st.url, e);
                            return Some((SseEvent::Error(error), st));
                        }
                    }
                }
                Phase::Streaming(mut body) => {
                    let chunk = tokio::select! {
                        biased;
                        _ = st.signal.cancelled() => return None,
                        chunk = body.next() => chunk,
                    };
                    match chunk {
                        Some(Ok(bytes)) => {
                            st.pending.extend(st.decoder.feed(&bytes));
                            st.phase = Phase::Streaming(body);
                        }
                        Some(Err(e)) if e.is_cancelled() => return None,
                        Some(Err(e)) => {
                            return Some((SseEvent::Error(StreamError::from_body(e)), st));
                        }
                        None => {
                            st.pending.extend(st.decoder.finish());
                            st.phase = Phase::Finished;
                        }
                    }
                }
                Phase::Finished => return Some((SseEvent::Complete, st)),
                Phase::Done => return None,
            }
        }
    })
}

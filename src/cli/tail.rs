//! Tail command: print events from an SSE endpoint until it ends or Ctrl-C.

use color_eyre::eyre::{eyre, Result};
use std::sync::Arc;

use super::args::TailOptions;
use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::sse::{create_simple_sse, create_sse_connection_with, SseConfig, SseState};

/// Render one event as printed by the tail command.
pub fn format_event(data: &str, event_type: &str) -> String {
    let name = if event_type.is_empty() { "message" } else { event_type };
    format!("[{}] {}", name, data)
}

pub async fn run_tail(options: TailOptions, mut config: ClientConfig) -> Result<()> {
    if let Some(token) = options.token.clone() {
        config = config.with_token(token);
    }
    let url = config.url(&options.target);

    if options.simple {
        return run_simple(&url).await;
    }

    let mut sse = SseConfig::new(url.clone())
        .on_open(|| tracing::info!("Connected"))
        .on_message(|data, event| println!("{}", format_event(data, event)))
        .on_error(|e| eprintln!("Error: {}", e.user_message()))
        .on_complete(|| tracing::info!("Stream ended"));
    if let Some(auth) = config.authorization() {
        sse = sse.with_header("Authorization", auth);
    }
    sse = sse.with_headers(options.headers);

    let http = ReqwestHttpClient::for_streaming(&config)?;
    let connection = create_sse_connection_with(Arc::new(http), sse);
    let mut state = connection.state_receiver();

    tokio::select! {
        _ = state.wait_for(SseState::is_terminal) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, closing {}", url);
            connection.cancel();
        }
    }

    match connection.join().await {
        SseState::Errored => Err(eyre!("stream from {} failed", url)),
        _ => Ok(()),
    }
}

async fn run_simple(url: &str) -> Result<()> {
    let source = create_simple_sse(url, |data| println!("{}", format_event(data, "")))?;
    tokio::signal::ctrl_c().await?;
    source.close();
    Ok(())
}

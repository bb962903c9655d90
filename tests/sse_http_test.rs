//! SSE over a real HTTP server using wiremock.

mod common;

use common::{Call, Recorder};
use console_client::adapters::ReqwestHttpClient;
use console_client::error::StreamError;
use console_client::sse::{
    create_simple_sse, create_sse_connection_with, subscribe, SseConfig, SseState,
};
use console_client::traits::Headers;
use console_client::{ApiClient, ClientConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn event_stream_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/event-stream")
        .set_body_string(body)
}

/// Serve one chunked event-stream response that sends `data: a` and then
/// keeps the connection open without writing.
async fn stalled_stream_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\n\
                  Content-Type: text/event-stream\r\n\
                  Transfer-Encoding: chunked\r\n\r\n\
                  8\r\ndata: a\n\r\n",
            )
            .await
            .unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });
    addr
}

fn timeout_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(format!("http://{}/api", addr))
        .with_connect_timeout(Duration::from_secs(5))
        .with_request_timeout(Duration::from_millis(300))
}

#[tokio::test]
async fn test_request_timeout_does_not_end_live_stream() {
    let addr = stalled_stream_server().await;
    let api = ApiClient::new(timeout_config(addr)).unwrap();
    let recorder = Recorder::default();

    let connection = api.connect_sse("/notice/stream", recorder.clone());
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(!connection.state().is_terminal());
    assert_eq!(recorder.calls(), vec![Call::Open, Call::message("a", "")]);

    connection.cancel();
    assert_eq!(connection.join().await, SseState::Cancelled);
    assert_eq!(recorder.calls().len(), 2);
}

#[tokio::test]
async fn test_streaming_transport_ignores_request_timeout() {
    let addr = stalled_stream_server().await;
    let config = timeout_config(addr);
    let http = ReqwestHttpClient::for_streaming(&config).unwrap();
    let recorder = Recorder::default();

    let connection = subscribe(
        Arc::new(http),
        config.url("/notice/stream"),
        Headers::new(),
        recorder.clone(),
    );
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(!connection.state().is_terminal());
    assert_eq!(recorder.calls(), vec![Call::Open, Call::message("a", "")]);
    connection.cancel();
}

#[tokio::test]
async fn test_stream_from_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notice/stream"))
        .and(header("Accept", "text/event-stream"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(event_stream_response(
            "event: notice\ndata: {\"id\":1}\n\n: ping\n\ndata: plain\n\n",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut headers = Headers::new();
    headers.insert("Authorization".to_string(), "Bearer test-token".to_string());
    let recorder = Recorder::default();
    let conn = subscribe(
        Arc::new(ReqwestHttpClient::new()),
        format!("{}/api/notice/stream", mock_server.uri()),
        headers,
        recorder.clone(),
    );
    let state = tokio::time::timeout(Duration::from_secs(5), conn.join())
        .await
        .unwrap();

    assert_eq!(state, SseState::Complete);
    assert_eq!(
        recorder.calls(),
        vec![
            Call::Open,
            Call::message("{\"id\":1}", "notice"),
            Call::message("plain", ""),
            Call::Complete,
        ]
    );
}

#[tokio::test]
async fn test_unauthorized_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notice/stream"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let errors = Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen = errors.clone();
    let config = SseConfig::new(format!("{}/api/notice/stream", mock_server.uri()))
        .on_open(|| panic!("open must not fire for a failed connect"))
        .on_message(|_, _| panic!("no messages expected"))
        .on_error(move |e| seen.lock().unwrap().push(e.clone()))
        .on_complete(|| panic!("complete must not fire after an error"));

    let conn = create_sse_connection_with(Arc::new(ReqwestHttpClient::new()), config);
    assert_eq!(conn.join().await, SseState::Errored);

    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].status(), Some(401));
    assert_eq!(errors[0].to_string(), "HTTP error! status: 401");
    assert!(!errors[0].is_retryable());
}

#[tokio::test]
async fn test_connection_refused_reports_connect_error() {
    let recorder = Recorder::default();
    let conn = subscribe(
        Arc::new(ReqwestHttpClient::new()),
        "http://127.0.0.1:59998/stream",
        Headers::new(),
        recorder.clone(),
    );
    assert_eq!(conn.join().await, SseState::Errored);
    assert!(matches!(
        recorder.calls().as_slice(),
        [Call::Error(StreamError::Connect { .. })]
    ));
}

#[tokio::test]
async fn test_simple_source_delivers_default_events() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/legacy/stream"))
        .respond_with(event_stream_response(
            "event: notice\ndata: skipped\n\ndata:\n\ndata: hello\n\n",
        ))
        .mount(&mock_server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let source = create_simple_sse(&format!("{}/legacy/stream", mock_server.uri()), move |data| {
        let _ = tx.send(data.to_string());
    })
    .unwrap();

    let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap();
    assert_eq!(first.as_deref(), Some("hello"));

    source.close();
}

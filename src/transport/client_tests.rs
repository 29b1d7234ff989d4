//! Tests for `ReqwestClient`.
//!
//! Request/response behavior of the API layer is covered through the mock
//! transport; these drive the real client against loopback sockets only.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use super::client::classify;
use super::{HttpClient, HttpError, HttpRequest, ReqwestClient};

/// Client that never routes through a proxy from the environment.
fn direct_client(timeout: Duration) -> ReqwestClient {
    ReqwestClient::from_client(
        reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .unwrap(),
    )
}

fn loopback_url(port: u16, path: &str) -> url::Url {
    url::Url::parse(&format!("http://127.0.0.1:{port}{path}")).unwrap()
}

/// Serves one canned response and hands back the raw request it read.
fn serve_once(response: &'static str, body_len: usize) -> (u16, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            let head_end = raw.windows(4).position(|w| w == b"\r\n\r\n");
            if head_end.is_some_and(|end| raw.len() >= end + 4 + body_len) {
                break;
            }
        }
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8(raw).unwrap()
    });

    (port, handle)
}

#[test]
fn constructors_build() {
    let _ = ReqwestClient::new();
    let _ = ReqwestClient::default();
    let _ = ReqwestClient::with_timeout(Duration::from_secs(5)).unwrap();
    let _ = ReqwestClient::from_client(reqwest::Client::new());
}

#[test]
fn is_send_sync_and_clone() {
    fn assert_traits<T: Send + Sync + Clone>() {}
    assert_traits::<ReqwestClient>();
}

#[test]
fn builder_failure_is_invalid_url() {
    let err = reqwest::Client::new().get("not a url").build().unwrap_err();

    assert!(matches!(classify(err), HttpError::InvalidUrl(_)));
}

#[tokio::test]
async fn sends_request_and_reads_response() {
    let (port, server) = serve_once(
        "HTTP/1.1 201 Created\r\ncontent-type: application/json\r\ncontent-length: 11\r\nconnection: close\r\n\r\n{\"ok\":true}",
        13,
    );
    let request = HttpRequest::new(http::Method::POST, loopback_url(port, "/v1/evaluate"))
        .with_json(&serde_json::json!({"text": "hi"}))
        .unwrap();

    let response = direct_client(Duration::from_secs(5))
        .send(request)
        .await
        .unwrap();

    assert_eq!(response.status, http::StatusCode::CREATED);
    assert_eq!(response.body, br#"{"ok":true}"#);
    assert_eq!(
        response.header_str(http::header::CONTENT_TYPE),
        Some("application/json")
    );

    let raw = server.join().unwrap().to_ascii_lowercase();
    assert!(raw.starts_with("post /v1/evaluate http/1.1\r\n"));
    assert!(raw.contains("content-type: application/json\r\n"));
    assert!(raw.ends_with(r#"{"text":"hi"}"#));
}

#[tokio::test]
async fn closed_port_is_a_connection_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = direct_client(Duration::from_secs(5))
        .send(HttpRequest::new(
            http::Method::GET,
            loopback_url(port, "/v1/signpost/countries"),
        ))
        .await;

    assert!(matches!(result, Err(HttpError::Connection(_))));
}

#[tokio::test]
async fn silent_server_is_a_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let (_stream, _) = listener.accept().unwrap();
        thread::sleep(Duration::from_secs(2));
    });

    let result = direct_client(Duration::from_millis(200))
        .send(HttpRequest::new(
            http::Method::GET,
            loopback_url(port, "/v1/evaluate"),
        ))
        .await;

    assert!(matches!(result, Err(HttpError::Timeout)));
}

//! Integration tests for the SSE client using wiremock mock server

use circle_sse::{EventRecord, SseClient, SseError};

use tokio::time::{Duration, timeout};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const STREAM: &[u8] = b"id: 1\nevent: new-auto\ndata: {\"marke\":\"Volkswagen\"}\n\n\
id: 2\nevent: score\ndata: first\nid: 2\nevent: score\ndata: second\n\n";

#[tokio::test]
async fn test_connect_receives_events_then_closes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dartcounter/sse"))
        .and(header("accept", "text/event-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_bytes(STREAM),
        )
        .mount(&mock_server)
        .await;

    let client = SseClient::new(&mock_server.uri());
    let mut events = client.connect("/dartcounter/sse").await.unwrap();

    let mut received = Vec::new();
    while let Some(record) = timeout(Duration::from_secs(2), events.recv()).await.unwrap() {
        received.push(record);
    }

    assert_eq!(
        received,
        vec![
            EventRecord::new("1", "new-auto", r#"{"marke":"Volkswagen"}"#),
            EventRecord::new("2", "score", "first"),
            EventRecord::new("2", "score", "second"),
        ]
    );
}

#[tokio::test]
async fn test_connect_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dartcounter/sse"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = SseClient::new(&mock_server.uri());
    let result = client.connect("/dartcounter/sse").await;

    assert!(matches!(
        result,
        Err(SseError::UnexpectedStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_connect_wrong_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dartcounter/sse"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_bytes("{}"),
        )
        .mount(&mock_server)
        .await;

    let client = SseClient::new(&mock_server.uri());
    let result = client.connect("/dartcounter/sse").await;

    match result {
        Err(SseError::UnexpectedContentType { content_type, .. }) => {
            assert_eq!(content_type, "application/json");
        }
        other => panic!("expected content type error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_connect_content_type_with_charset_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sse"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream; charset=utf-8")
                .set_body_bytes(STREAM),
        )
        .mount(&mock_server)
        .await;

    let client = SseClient::new(&mock_server.uri());
    let result = client.connect("/sse").await;

    assert!(matches!(result, Err(SseError::UnexpectedContentType { .. })));
}

#[tokio::test]
async fn test_connect_unreachable_server() {
    // Nothing listens on the discard port
    let client = SseClient::new("http://127.0.0.1:9/");
    let result = client.connect("/sse").await;

    assert!(matches!(result, Err(SseError::Http { .. })));
}

#[tokio::test]
async fn test_trailing_slash_trimmed_from_base_url() {
    let client = SseClient::new("http://localhost:8888/");

    assert_eq!(client.url("/dartcounter/sse"), "http://localhost:8888/dartcounter/sse");
}

#[tokio::test]
async fn test_line_over_limit_ends_stream_after_earlier_records() {
    let mock_server = MockServer::start().await;

    let mut body = b"id: 1\nevent: score\ndata: ok\n\nid: 2\nevent: score\ndata: ".to_vec();
    body.extend(std::iter::repeat_n(b'x', 64));
    body.extend_from_slice(b"\n\n");

    Mock::given(method("GET"))
        .and(path("/dartcounter/sse"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_bytes(body),
        )
        .mount(&mock_server)
        .await;

    let client = SseClient::new(&mock_server.uri()).with_max_line_length(32);
    let mut events = client.connect("/dartcounter/sse").await.unwrap();

    let first = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    assert_eq!(first, Some(EventRecord::new("1", "score", "ok")));

    let next = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    assert_eq!(next, None);
}

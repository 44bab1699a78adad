use std::time::{Duration, Instant};

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use todo_server::{app, ServerConfig};
use tower::ServiceExt;

async fn create_and_time(config: &ServerConfig) -> (StatusCode, bytes::Bytes, Duration) {
    let request = Request::builder()
        .method("POST")
        .uri("/todo")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(r#"{"title":"Buy milk"}"#.to_string())
        .unwrap();

    let started = Instant::now();
    let resp = app(config).oneshot(request).await.unwrap();
    let elapsed = started.elapsed();

    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body, elapsed)
}

#[tokio::test]
async fn latency_delays_response_without_changing_it() {
    let (plain_status, plain_body, _) = create_and_time(&ServerConfig::default()).await;
    let (slow_status, slow_body, elapsed) =
        create_and_time(&ServerConfig::default().with_latency(50)).await;

    assert!(elapsed >= Duration::from_millis(50), "elapsed {elapsed:?}");
    assert_eq!(plain_status, StatusCode::CREATED);
    assert_eq!(slow_status, plain_status);
    assert_eq!(slow_body, plain_body);
}

#[tokio::test]
async fn latency_applies_to_error_responses() {
    let config = ServerConfig::default().with_latency(50);
    let request = Request::builder()
        .method("DELETE")
        .uri("/todo/99")
        .body(String::new())
        .unwrap();

    let started = Instant::now();
    let resp = app(&config).oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(started.elapsed() >= Duration::from_millis(50));
}

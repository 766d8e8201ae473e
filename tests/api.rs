//! Status endpoint over the axum router

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use hft_symbols::infrastructure::api::{router, STATUS_RECENT};
use hft_symbols::infrastructure::{StatusRecord, StatusService};
use std::sync::Arc;
use tower::ServiceExt;

fn post(record: &StatusRecord) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/status")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(record).unwrap()))
        .unwrap()
}

fn record(id: i64) -> StatusRecord {
    StatusRecord {
        id,
        bid_price: 64000.1,
        ask_price: 64000.2,
        timestamp_ns: 1_700_000_000_000_000_000,
        consumer_id: "consumer-a".to_string(),
    }
}

#[tokio::test]
async fn test_post_acknowledges() {
    let app = router(Arc::new(StatusService::new()));

    let response = app.oneshot(post(&record(1))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let ack: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ack, serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn test_get_returns_recent_twenty() {
    let service = Arc::new(StatusService::new());
    for id in 0..60 {
        router(service.clone()).oneshot(post(&record(id))).await.unwrap();
    }
    assert_eq!(service.len(), 50);

    let request = Request::builder().uri("/status").body(Body::empty()).unwrap();
    let response = router(service).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let records: Vec<StatusRecord> = serde_json::from_slice(&body).unwrap();
    assert_eq!(records.len(), STATUS_RECENT);
    assert_eq!(records[0].id, 40);
    assert_eq!(records[STATUS_RECENT - 1].id, 59);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let service = Arc::new(StatusService::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/status")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"id":"nope"}"#))
        .unwrap();

    let response = router(service.clone()).oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
    assert!(service.is_empty());
}

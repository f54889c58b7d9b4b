//! Tests for the HTTP notification surface

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::rpc;
use crate::telemetry::{TraceContext, TRACEPARENT};

use super::client::NotificationClient;
use super::http::{build_router, AppState};
use super::service::NotificationService;

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("handler ran");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body read");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

/// State backed by a live in-process RPC service.
async fn state_with_backend() -> (AppState, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let cancel = CancellationToken::new();
    tokio::spawn(rpc::serve(
        listener,
        Arc::new(NotificationService::new()),
        cancel.clone(),
    ));
    (
        AppState {
            push: NotificationClient::new(addr.to_string()),
        },
        cancel,
    )
}

/// State pointed at a port nobody is listening on.
async fn state_with_dead_backend() -> AppState {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    AppState {
        push: NotificationClient::new(addr.to_string()),
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request built")
}

/// Test: a push request round-trips through the RPC backend
#[tokio::test]
async fn test_push_round_trips_through_backend() {
    let (state, cancel) = state_with_backend().await;
    let router = build_router(state);

    let request = post_json(
        "/notifications/push",
        json!({ "user_id": 42, "title": "hello", "body": "world" }),
    );
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("sent"));

    cancel.cancel();
}

/// Test: an unreachable backend surfaces as 502, not a hang or panic
#[tokio::test]
async fn test_push_reports_unreachable_backend() {
    let state = state_with_dead_backend().await;
    let router = build_router(state);

    let request = post_json(
        "/notifications/push",
        json!({ "user_id": 1, "title": "t", "body": "b" }),
    );
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
}

/// Test: the email endpoint echoes the propagated trace id and the payload
#[tokio::test]
async fn test_email_echoes_trace_id_and_payload() {
    let state = state_with_dead_backend().await;
    let router = build_router(state);
    let context = TraceContext::new_root();

    let request = Request::builder()
        .method("POST")
        .uri("/notifications/email")
        .header("content-type", "application/json")
        .header(TRACEPARENT, context.traceparent())
        .body(Body::from(
            json!({
                "user_id": 7,
                "email": "user@example.com",
                "subject": "greetings",
                "body": "hello",
            })
            .to_string(),
        ))
        .expect("request built");
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["trace_id"], json!(context.trace_id_hex()));
    assert_eq!(body["payload"]["email"], json!("user@example.com"));
    assert_eq!(body["payload"]["subject"], json!("greetings"));
}

/// Test: a body that is not JSON is a 400 with a failure envelope
#[tokio::test]
async fn test_malformed_body_is_a_bad_request() {
    let state = state_with_dead_backend().await;
    let router = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/notifications/email")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("request built");
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["message"]
        .as_str()
        .expect("message is a string")
        .contains("invalid request body"));
}

/// Test: the liveness endpoint answers 200
#[tokio::test]
async fn test_healthz_reports_ok() {
    let state = state_with_dead_backend().await;
    let router = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/healthz")
        .body(Body::empty())
        .expect("request built");
    let response = router.oneshot(request).await.expect("handler ran");

    assert_eq!(response.status(), StatusCode::OK);
}

//! HTTP surface: push and email notification endpoints

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{debug, error, info};

use crate::telemetry::{extract_http, start_span};

use super::client::NotificationClient;
use super::types::{
    EmailNotificationRequest, EmailNotificationResponse, NotificationResponse,
    PushNotificationRequest,
};

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub push: NotificationClient,
}

/// Build the notification router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/notifications/push", post(send_push))
        .route("/notifications/email", post(send_email))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn send_push(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let span = start_span(extract_http(&headers).as_ref(), "http.send_push_notification");
    let context = span.context().clone();

    debug!(body = %String::from_utf8_lossy(&body), "raw request body");

    let request: PushNotificationRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(
                trace_id = %context.trace_id_hex(),
                span_id = %context.span_id_hex(),
                error = %err,
                "cannot unmarshal body"
            );
            return (
                StatusCode::BAD_REQUEST,
                Json(NotificationResponse::failure(format!(
                    "invalid request body: {err}"
                ))),
            )
                .into_response();
        }
    };

    info!(
        trace_id = %context.trace_id_hex(),
        span_id = %context.span_id_hex(),
        user_id = request.user_id,
        "http.send_push_notification: span info"
    );

    match state.push.send_push(&context, &request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            error!(
                trace_id = %context.trace_id_hex(),
                span_id = %context.span_id_hex(),
                error = %err,
                "rpc call failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(NotificationResponse::failure(
                    "notification backend unavailable",
                )),
            )
                .into_response()
        }
    }
}

async fn send_email(State(_state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let span = start_span(
        extract_http(&headers).as_ref(),
        "http.send_email_notification",
    );
    let context = span.context().clone();

    debug!(body = %String::from_utf8_lossy(&body), "raw request body");

    let request: EmailNotificationRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(
                trace_id = %context.trace_id_hex(),
                span_id = %context.span_id_hex(),
                error = %err,
                "cannot unmarshal body"
            );
            return (
                StatusCode::BAD_REQUEST,
                Json(NotificationResponse::failure(format!(
                    "invalid request body: {err}"
                ))),
            )
                .into_response();
        }
    };

    info!(
        trace_id = %context.trace_id_hex(),
        span_id = %context.span_id_hex(),
        user_id = request.user_id,
        email = %request.email,
        "http.send_email_notification: span info"
    );

    let response = EmailNotificationResponse {
        success: true,
        message: "email sent".to_string(),
        trace_id: context.trace_id_hex(),
        payload: request,
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

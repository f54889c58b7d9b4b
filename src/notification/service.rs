//! RPC-side notification service
//!
//! Receives push deliveries on the RPC surface. The span here derives from
//! the metadata-propagated context, so its log lines correlate with the HTTP
//! ingress that triggered the call.

use async_trait::async_trait;
use tracing::{error, info};

use crate::rpc::{RpcRequest, RpcResponse, RpcService};
use crate::telemetry::{extract_metadata, start_span};

use super::types::{NotificationResponse, PushNotificationRpc};

/// Qualified method name for push delivery.
pub const SEND_PUSH_METHOD: &str = "NotificationService.SendPushNotification";

/// Notification backend exposed on the RPC surface.
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        Self
    }

    fn send_push(&self, request: &RpcRequest) -> RpcResponse {
        let parent = extract_metadata(&request.metadata);
        let span = start_span(parent.as_ref(), "rpc.send_push_notification");
        let ctx = span.context().clone();

        let push: PushNotificationRpc = match serde_json::from_value(request.body.clone()) {
            Ok(push) => push,
            Err(e) => {
                error!(
                    trace_id = %ctx.trace_id_hex(),
                    span_id = %ctx.span_id_hex(),
                    error = %e,
                    "rpc.send_push_notification: invalid payload"
                );
                return RpcResponse::failure(format!("invalid push notification payload: {e}"));
            }
        };

        info!(
            trace_id = %ctx.trace_id_hex(),
            span_id = %ctx.span_id_hex(),
            user_id = %push.user_id,
            title = %push.title,
            "rpc.send_push_notification: span info"
        );

        span.end();
        match serde_json::to_value(NotificationResponse::sent("sent")) {
            Ok(body) => RpcResponse::ok(body),
            Err(e) => RpcResponse::failure(format!("response encoding failed: {e}")),
        }
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RpcService for NotificationService {
    async fn call(&self, request: RpcRequest) -> RpcResponse {
        match request.method.as_str() {
            SEND_PUSH_METHOD => self.send_push(&request),
            other => RpcResponse::failure(format!("unknown method: {other}")),
        }
    }
}

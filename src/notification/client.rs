//! Boundary-crossing push dispatch to the RPC backend

use std::collections::HashMap;

use tracing::debug;

use crate::rpc::{RpcClient, RpcError, RpcRequest};
use crate::telemetry::{inject_metadata, TraceContext};

use super::service::SEND_PUSH_METHOD;
use super::types::{NotificationResponse, PushNotificationRequest, PushNotificationRpc};

/// Client for the notification backend's RPC surface.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    rpc: RpcClient,
}

impl NotificationClient {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            rpc: RpcClient::new(addr),
        }
    }

    /// Send a push notification over the RPC hop.
    ///
    /// The active context is injected into the call metadata before dispatch,
    /// so the backend derives its span from the same trace.
    pub async fn send_push(
        &self,
        context: &TraceContext,
        request: &PushNotificationRequest,
    ) -> Result<NotificationResponse, RpcError> {
        let mut metadata = HashMap::new();
        inject_metadata(&mut metadata, context);

        let rpc_request = RpcRequest {
            method: SEND_PUSH_METHOD.to_string(),
            metadata,
            body: serde_json::to_value(PushNotificationRpc::from_http(request))?,
        };

        let response = self.rpc.call(rpc_request).await?;
        debug!(
            trace_id = %context.trace_id_hex(),
            success = response.success,
            "rpc payload response"
        );

        Ok(serde_json::from_value(response.body)?)
    }
}

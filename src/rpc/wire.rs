//! Wire envelopes for the notification RPC transport
//!
//! Frames are length-delimited JSON. The metadata map plays the role call
//! metadata plays in gRPC: transport-level key/values (notably the
//! traceparent) that travel beside the method body.

use std::collections::HashMap;

use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the RPC transport.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The backend could not be reached.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    /// Reading or writing a frame failed mid-call.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// A frame payload could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The connection closed before a response frame arrived.
    #[error("connection closed before a response arrived")]
    ConnectionClosed,

    /// The remote side answered with a failure envelope.
    #[error("remote error: {0}")]
    Remote(String),
}

/// One request frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Qualified method name, e.g. `NotificationService.SendPushNotification`.
    pub method: String,
    /// Call metadata; carries the traceparent.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Method-specific JSON body.
    #[serde(default)]
    pub body: Value,
}

/// One response frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub body: Value,
}

impl RpcResponse {
    /// Successful response carrying a method-specific body.
    pub fn ok(body: Value) -> Self {
        Self {
            success: true,
            error: None,
            body,
        }
    }

    /// Application-level failure; stays an envelope, never a transport error.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            body: Value::Null,
        }
    }
}

/// Encode one frame payload.
pub fn encode<T: Serialize>(message: &T) -> Result<Bytes, RpcError> {
    Ok(Bytes::from(serde_json::to_vec(message)?))
}

/// Decode one frame payload.
pub fn decode<T: DeserializeOwned>(frame: &[u8]) -> Result<T, RpcError> {
    Ok(serde_json::from_slice(frame)?)
}

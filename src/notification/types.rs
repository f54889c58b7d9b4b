//! Request and response payloads for the notification surfaces

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /notifications/push`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushNotificationRequest {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

/// Body of `POST /notifications/email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailNotificationRequest {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

/// Push payload as carried over the RPC hop; the user id is string-encoded
/// on this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushNotificationRpc {
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl PushNotificationRpc {
    /// Build the RPC payload from the HTTP body.
    pub fn from_http(request: &PushNotificationRequest) -> Self {
        Self {
            user_id: request.user_id.to_string(),
            device_id: request.device_id.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
            data: request.data.clone(),
        }
    }
}

/// Success/failure envelope shared by both surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub message: String,
}

impl NotificationResponse {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Envelope returned by the email endpoint: echoes the correlation trace id
/// and the submitted payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailNotificationResponse {
    pub success: bool,
    pub message: String,
    pub trace_id: String,
    pub payload: EmailNotificationRequest,
}

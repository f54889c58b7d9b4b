//! Notification domain: HTTP surface, RPC backend, and the client between them
//!
//! The HTTP handlers accept push and email requests. Push crosses the RPC
//! boundary to the backend service; email is handled locally and echoes the
//! correlation trace id back to the caller.

mod client;
mod http;
mod service;
mod types;

pub use client::NotificationClient;
pub use http::{build_router, AppState};
pub use service::{NotificationService, SEND_PUSH_METHOD};
pub use types::{
    EmailNotificationRequest, EmailNotificationResponse, NotificationResponse,
    PushNotificationRequest, PushNotificationRpc,
};

#[cfg(test)]
#[path = "service_test.rs"]
mod service_tests;

#[cfg(test)]
#[path = "http_test.rs"]
mod http_tests;

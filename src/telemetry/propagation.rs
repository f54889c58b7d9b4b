//! Carrier inject/extract for the trace context
//!
//! HTTP uses the standard `traceparent` header; the RPC transport carries the
//! same value under the same key in its call metadata, so either side can
//! parse what the other emits without coupling to its internal representation.

use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderValue};

use super::context::TraceContext;

/// W3C trace-context header name, also used as the RPC metadata key.
pub const TRACEPARENT: &str = "traceparent";

/// Read the propagated identity from incoming HTTP headers.
///
/// Absent or malformed headers yield `None` (no parent) rather than an error.
pub fn extract_http(headers: &HeaderMap) -> Option<TraceContext> {
    let value = headers.get(TRACEPARENT)?.to_str().ok()?;
    TraceContext::parse_traceparent(value)
}

/// Write the identity onto outgoing HTTP headers.
pub fn inject_http(headers: &mut HeaderMap, context: &TraceContext) {
    if let Ok(value) = HeaderValue::from_str(&context.traceparent()) {
        headers.insert(TRACEPARENT, value);
    }
}

/// Read the propagated identity from incoming RPC call metadata.
pub fn extract_metadata(metadata: &HashMap<String, String>) -> Option<TraceContext> {
    TraceContext::parse_traceparent(metadata.get(TRACEPARENT)?)
}

/// Write the identity onto outgoing RPC call metadata.
pub fn inject_metadata(metadata: &mut HashMap<String, String>, context: &TraceContext) {
    metadata.insert(TRACEPARENT.to_string(), context.traceparent());
}

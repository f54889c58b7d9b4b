//! Trace-context propagation across service boundaries
//!
//! Creates a correlation identity (trace id, span id) at each service
//! boundary, carries it over HTTP headers and RPC call metadata, and exposes
//! it for structured logging. Pure and stateless per call; no exporter
//! pipeline is configured here.

mod context;
mod propagation;
mod span;

pub use context::TraceContext;
pub use propagation::{extract_http, extract_metadata, inject_http, inject_metadata, TRACEPARENT};
pub use span::{start_span, Span};

#[cfg(test)]
#[path = "context_test.rs"]
mod context_tests;

#[cfg(test)]
#[path = "propagation_test.rs"]
mod propagation_tests;

#[cfg(test)]
#[path = "span_test.rs"]
mod span_tests;

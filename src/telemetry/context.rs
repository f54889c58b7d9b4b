//! Correlation identity for units of work
//!
//! A `TraceContext` ties every log line and response produced while handling
//! a request back to the same logical trace, including across the HTTP → RPC
//! hop. Contexts are owned per request and propagated by value; concurrent
//! requests never alias the same instance.

use uuid::Uuid;

/// W3C traceparent version emitted and accepted by this service.
const TRACEPARENT_VERSION: &str = "00";

/// Trace flags emitted on outgoing carriers (sampled).
const TRACEPARENT_FLAGS: &str = "01";

/// Correlation identity for one unit of work within a logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Shared by every span belonging to one logical request.
    pub trace_id: u128,
    /// Unique per unit of work.
    pub span_id: u64,
    /// Set when this context was derived from another span.
    pub parent_span_id: Option<u64>,
}

impl TraceContext {
    /// Create a root context for a request observed with no parent
    /// (the first hop of a request).
    pub fn new_root() -> Self {
        Self {
            trace_id: fresh_trace_id(),
            span_id: fresh_span_id(),
            parent_span_id: None,
        }
    }

    /// Derive a child context: same trace id, fresh span id.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: fresh_span_id(),
            parent_span_id: Some(self.span_id),
        }
    }

    /// Lowercase hex trace id (32 chars) for structured logging.
    pub fn trace_id_hex(&self) -> String {
        format!("{:032x}", self.trace_id)
    }

    /// Lowercase hex span id (16 chars) for structured logging.
    pub fn span_id_hex(&self) -> String {
        format!("{:016x}", self.span_id)
    }

    /// Serialize into the W3C traceparent carrier form.
    pub fn traceparent(&self) -> String {
        format!(
            "{}-{:032x}-{:016x}-{}",
            TRACEPARENT_VERSION, self.trace_id, self.span_id, TRACEPARENT_FLAGS
        )
    }

    /// Parse a traceparent value.
    ///
    /// Returns `None` for anything malformed. Propagation is best-effort and
    /// must never fail the request carrying the value.
    pub fn parse_traceparent(value: &str) -> Option<Self> {
        let mut parts = value.split('-');
        let version = parts.next()?;
        let trace = parts.next()?;
        let span = parts.next()?;
        let _flags = parts.next()?;
        if parts.next().is_some() || version != TRACEPARENT_VERSION {
            return None;
        }
        if trace.len() != 32 || span.len() != 16 {
            return None;
        }
        let trace_id = u128::from_str_radix(trace, 16).ok()?;
        let span_id = u64::from_str_radix(span, 16).ok()?;
        // All-zero identifiers are invalid per W3C trace-context.
        if trace_id == 0 || span_id == 0 {
            return None;
        }
        Some(Self {
            trace_id,
            span_id,
            parent_span_id: None,
        })
    }
}

/// Mint a non-zero 128-bit trace id.
fn fresh_trace_id() -> u128 {
    loop {
        let id = Uuid::new_v4().as_u128();
        if id != 0 {
            return id;
        }
    }
}

/// Mint a non-zero 64-bit span id.
fn fresh_span_id() -> u64 {
    loop {
        let id = rand::random::<u64>();
        if id != 0 {
            return id;
        }
    }
}

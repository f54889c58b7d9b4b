//! Span lifecycle for units of work

use std::time::Instant;

use tracing::debug;

use super::context::TraceContext;

/// Handle for one unit of work.
///
/// Owns the context derived at [`start_span`] and finalizes its timing when
/// ended. Finalization also runs on drop, so early returns and error paths
/// release the span without explicit bookkeeping on every exit.
pub struct Span {
    context: TraceContext,
    operation: String,
    started_at: Instant,
    finished: bool,
}

/// Start a span for `operation`.
///
/// Reuses the parent's trace id verbatim when a parent is present; otherwise
/// mints a fresh trace (first hop of a request). A new span id is produced
/// either way.
pub fn start_span(parent: Option<&TraceContext>, operation: &str) -> Span {
    let context = match parent {
        Some(parent) => parent.child(),
        None => TraceContext::new_root(),
    };
    Span {
        context,
        operation: operation.to_string(),
        started_at: Instant::now(),
        finished: false,
    }
}

impl Span {
    /// The context this span runs under.
    pub fn context(&self) -> &TraceContext {
        &self.context
    }

    /// Finalize the span's timing.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        debug!(
            operation = %self.operation,
            trace_id = %self.context.trace_id_hex(),
            span_id = %self.context.span_id_hex(),
            elapsed_ms = self.started_at.elapsed().as_millis() as u64,
            "span completed"
        );
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        self.finish();
    }
}

//! Tests for correlation identity derivation and carrier formatting

use super::TraceContext;

/// Test: a root context mints non-zero identifiers and has no parent
#[test]
fn test_root_context_has_nonzero_ids() {
    let ctx = TraceContext::new_root();

    assert_ne!(ctx.trace_id, 0);
    assert_ne!(ctx.span_id, 0);
    assert!(ctx.parent_span_id.is_none());
}

/// Test: two root contexts belong to different traces
#[test]
fn test_root_contexts_are_distinct() {
    let a = TraceContext::new_root();
    let b = TraceContext::new_root();

    assert_ne!(a.trace_id, b.trace_id);
}

/// Test: derivation preserves the trace id and mints a fresh span id
#[test]
fn test_child_preserves_trace_id() {
    let parent = TraceContext::new_root();
    let child = parent.child();

    assert_eq!(child.trace_id, parent.trace_id);
    assert_ne!(child.span_id, parent.span_id);
    assert_eq!(child.parent_span_id, Some(parent.span_id));
}

/// Test: the traceparent form round-trips through parse
#[test]
fn test_traceparent_round_trip() {
    let ctx = TraceContext::new_root();

    let parsed = TraceContext::parse_traceparent(&ctx.traceparent()).expect("valid traceparent");

    assert_eq!(parsed.trace_id, ctx.trace_id);
    assert_eq!(parsed.span_id, ctx.span_id);
}

/// Test: the carrier uses the fixed-width W3C form
#[test]
fn test_traceparent_format() {
    let ctx = TraceContext {
        trace_id: 0xabc,
        span_id: 0x12,
        parent_span_id: None,
    };

    assert_eq!(
        ctx.traceparent(),
        "00-00000000000000000000000000000abc-0000000000000012-01"
    );
}

/// Test: malformed carriers parse to no parent, never an error
#[test]
fn test_parse_rejects_malformed() {
    let malformed = [
        "",
        "garbage",
        // wrong version
        "ff-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
        // trace id too short
        "00-4bf92f35-00f067aa0ba902b7-01",
        // span id too short
        "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa-01",
        // all-zero trace id
        "00-00000000000000000000000000000000-00f067aa0ba902b7-01",
        // all-zero span id
        "00-4bf92f3577b34da6a3ce929d0e0e4736-0000000000000000-01",
        // non-hex trace id
        "00-zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz-00f067aa0ba902b7-01",
        // missing flags
        "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7",
        // trailing segment
        "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01-xx",
    ];

    for value in malformed {
        assert!(
            TraceContext::parse_traceparent(value).is_none(),
            "expected rejection of {value:?}"
        );
    }
}

/// Test: hex accessors are zero-padded to their fixed widths
#[test]
fn test_hex_accessors_fixed_width() {
    let ctx = TraceContext {
        trace_id: 1,
        span_id: 1,
        parent_span_id: None,
    };

    assert_eq!(ctx.trace_id_hex().len(), 32);
    assert_eq!(ctx.span_id_hex().len(), 16);
}

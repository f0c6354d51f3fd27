//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use trellis_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_constraint_syntax() {
    let err = Error::constraint_syntax(2, "x-");
    assert!(matches!(err.kind, ErrorKind::ConstraintSyntax { group: 2, .. }));
    let msg = format!("{err}");
    assert!(msg.contains("x-"));
    assert!(msg.contains('2'));
}

#[test]
fn error_span_out_of_bounds() {
    let err = Error::span_out_of_bounds(3, 9, 4);
    assert!(matches!(
        err.kind,
        ErrorKind::SpanOutOfBounds { i: 3, j: 9, length: 4 }
    ));
    assert!(format!("{err}").contains("(3,9)"));
}

#[test]
fn error_duplicate_goal() {
    let err = Error::duplicate_goal(12);
    assert!(matches!(err.kind, ErrorKind::DuplicateGoal { existing: 12 }));
    assert!(format!("{err}").contains("12"));
}

#[test]
fn error_invalid_arc() {
    let err = Error::invalid_arc(1, "span must be at least 1");
    assert!(matches!(err.kind, ErrorKind::InvalidArc { position: 1, .. }));
    assert!(format!("{err}").contains("span must be at least 1"));
}

#[test]
fn error_arity_mismatch() {
    let err = Error::arity_mismatch(2, 3);
    assert!(matches!(
        err.kind,
        ErrorKind::ArityMismatch {
            expected: 2,
            actual: 3
        }
    ));
    let msg = format!("{err}");
    assert!(msg.contains('2'));
    assert!(msg.contains('3'));
}

#[test]
fn error_internal() {
    let err = Error::internal("chart corrupted");
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
    assert!(format!("{err}").contains("chart corrupted"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_starts_empty() {
    let err = Error::new(ErrorKind::UnknownNode(4));
    assert!(err.context.is_none());
}

#[test]
fn context_attaches() {
    let err = Error::duplicate_goal(1).with_context(
        ErrorContext::new()
            .with_source("sentence 3")
            .with_span(0, 4)
            .with_frame("bottom-up parse"),
    );
    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("sentence 3"));
    assert_eq!(ctx.span, Some((0, 4)));
    assert_eq!(ctx.stack, vec!["bottom-up parse".to_string()]);
}

#[test]
fn context_display() {
    let ctx = ErrorContext::new()
        .with_source("sentence 3")
        .with_span(1, 2)
        .with_frame("unary closure");
    let text = ctx.to_string();
    assert!(text.starts_with("in sentence 3 at span (1,2)"));
    assert!(text.contains("  in unary closure"));
}

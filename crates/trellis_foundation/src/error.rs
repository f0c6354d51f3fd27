//! Error types for the Trellis system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Everything here is a broken contract (bad input data or an internal
//! invariant); the ordinary "no parse" outcome is not an error.

use std::fmt;

use thiserror::Error;

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a constraint group count mismatch error.
    #[must_use]
    pub fn constraint_group_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ConstraintGroupMismatch { expected, actual })
    }

    /// Creates a constraint syntax error.
    #[must_use]
    pub fn constraint_syntax(group: usize, item: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConstraintSyntax {
            group,
            item: item.into(),
        })
    }

    /// Creates a span out of bounds error.
    #[must_use]
    pub fn span_out_of_bounds(i: usize, j: usize, length: usize) -> Self {
        Self::new(ErrorKind::SpanOutOfBounds { i, j, length })
    }

    /// Creates a duplicate goal node error.
    #[must_use]
    pub fn duplicate_goal(existing: usize) -> Self {
        Self::new(ErrorKind::DuplicateGoal { existing })
    }

    /// Creates an invalid lattice arc error.
    #[must_use]
    pub fn invalid_arc(position: usize, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArc {
            position,
            reason: reason.into(),
        })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Constraint specification does not have one group per source position.
    #[error("constraint specification has {actual} groups, sentence has {expected} positions")]
    ConstraintGroupMismatch {
        /// The source sentence length.
        expected: usize,
        /// Number of `;`-delimited groups found.
        actual: usize,
    },

    /// A constraint item is not an integer or `a-b` range.
    #[error("malformed constraint item `{item}` in group {group}")]
    ConstraintSyntax {
        /// Source position whose group contained the item.
        group: usize,
        /// The offending item.
        item: String,
    },

    /// A span query fell outside the chart or mask.
    #[error("span ({i},{j}) out of bounds (length {length})")]
    SpanOutOfBounds {
        /// Span start.
        i: usize,
        /// Span end.
        j: usize,
        /// Size of the structure that was queried.
        length: usize,
    },

    /// A second goal node was about to be created.
    #[error("goal node already exists (node {existing})")]
    DuplicateGoal {
        /// The existing goal node.
        existing: usize,
    },

    /// A lattice arc is malformed.
    #[error("invalid lattice arc at position {position}: {reason}")]
    InvalidArc {
        /// Position the arc leaves from.
        position: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Error in PLF lattice text.
    #[error("PLF syntax error at offset {offset}: {message}")]
    PlfSyntax {
        /// Byte offset into the input.
        offset: usize,
        /// Description of the error.
        message: String,
    },

    /// Edge tail size does not match the rule's nonterminal arity.
    #[error("arity mismatch: rule expects {expected} antecedents, got {actual}")]
    ArityMismatch {
        /// The rule's arity.
        expected: usize,
        /// The tail size.
        actual: usize,
    },

    /// A rule is malformed.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A node id does not exist in the forest.
    #[error("unknown forest node: {0}")]
    UnknownNode(usize),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Sentence id or grammar name.
    pub source: Option<String>,
    /// Span being processed.
    pub span: Option<(usize, usize)>,
    /// Stack of operations that led here.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the span.
    #[must_use]
    pub fn with_span(mut self, i: usize, j: usize) -> Self {
        self.span = Some((i, j));
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let Some((i, j)) = self.span {
                write!(f, " at span ({i},{j})")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

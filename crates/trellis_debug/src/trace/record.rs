//! Trace event and record types.
//!
//! This module defines the events the chart parser can report while it
//! works through a sentence.

use trellis_foundation::CategoryId;

// =============================================================================
// Parse Event
// =============================================================================

/// Events that can be traced during a parse.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseEvent {
    /// A sentence parse has started.
    ParseStart {
        /// Number of lattice positions.
        positions: usize,
        /// Number of grammars in use.
        grammars: usize,
    },

    /// A constraint mask was built for this sentence.
    ConstraintsActive {
        /// The raw constraint string.
        spec: String,
    },

    /// All spans of one width have been processed.
    WidthComplete {
        /// Span width.
        width: usize,
        /// Forest nodes so far.
        nodes: usize,
        /// Forest edges so far.
        edges: usize,
    },

    /// A unary rule was left out of the closure because it closes a cycle.
    UnaryCycleDropped {
        /// Grammar holding the rule.
        grammar: String,
        /// Left-hand side.
        lhs: CategoryId,
        /// Right-hand side.
        rhs: CategoryId,
    },

    /// The goal category was proved over the whole input.
    GoalFound {
        /// Width at which the goal appeared.
        width: usize,
    },

    /// No derivation covers the whole input.
    ParseFailed {
        /// Number of lattice positions.
        positions: usize,
    },

    /// Unreachable forest structure was removed.
    ForestPruned {
        /// Nodes before pruning.
        nodes_before: usize,
        /// Nodes after pruning.
        nodes_after: usize,
        /// Edges before pruning.
        edges_before: usize,
        /// Edges after pruning.
        edges_after: usize,
    },

    /// A sentence parse has ended.
    ParseEnd {
        /// Whether a goal node was produced.
        success: bool,
    },

    /// Free-form event.
    Custom {
        /// Event name.
        name: String,
        /// Event message.
        message: String,
    },
}

impl ParseEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ParseStart { .. } => "parse-start",
            Self::ConstraintsActive { .. } => "constraints-active",
            Self::WidthComplete { .. } => "width-complete",
            Self::UnaryCycleDropped { .. } => "unary-cycle-dropped",
            Self::GoalFound { .. } => "goal-found",
            Self::ParseFailed { .. } => "parse-failed",
            Self::ForestPruned { .. } => "forest-pruned",
            Self::ParseEnd { .. } => "parse-end",
            Self::Custom { .. } => "custom",
        }
    }

    /// Returns true if this event opens or closes a sentence.
    #[must_use]
    pub fn is_sentence_boundary(&self) -> bool {
        matches!(self, Self::ParseStart { .. } | Self::ParseEnd { .. })
    }

    /// Returns true if this event reports something the user should see
    /// even when not tracing progress.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::UnaryCycleDropped { .. } | Self::ParseFailed { .. }
        )
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// The sentence being parsed when this event occurred.
    pub sentence: u64,
    /// Timestamp in nanoseconds since the tracer was created.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: ParseEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, sentence: u64, timestamp_ns: u64, event: ParseEvent) -> Self {
        Self {
            id,
            sentence,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Tests
// =============================================================================

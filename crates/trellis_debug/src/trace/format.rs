//! Trace output formatters.
//!
//! Human-readable and JSON renderings of trace records. Category ids are
//! resolved through the [`Vocab`] the parse was run with.

use std::fmt::Write;

use trellis_foundation::{CategoryId, Vocab};

use super::record::{ParseEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord, vocab: &Vocab) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord], vocab: &Vocab) -> String {
        records
            .iter()
            .map(|r| self.format(r, vocab))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn category_name(id: CategoryId, vocab: &Vocab) -> &str {
    vocab.category_name(id).unwrap_or("?")
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord, vocab: &Vocab) -> String {
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:06}] ", record.id);
        }

        let _ = write!(prefix, "S{:04} ", record.sentence);

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        let event_str = match &record.event {
            ParseEvent::ParseStart {
                positions,
                grammars,
            } => {
                format!("=== PARSE {positions} positions, {grammars} grammars ===")
            }
            ParseEvent::ParseEnd { success } => {
                let status = if *success { "OK" } else { "NO PARSE" };
                format!("=== PARSE END ({status}) ===")
            }
            ParseEvent::ConstraintsActive { spec } => {
                format!("  CONSTRAINTS {spec}")
            }
            ParseEvent::WidthComplete {
                width,
                nodes,
                edges,
            } => {
                format!("  WIDTH {width}: {nodes} nodes, {edges} edges")
            }
            ParseEvent::UnaryCycleDropped { grammar, lhs, rhs } => {
                format!(
                    "  WARNING unary cycle: dropping [{}] -> [{}] from {grammar}",
                    category_name(*lhs, vocab),
                    category_name(*rhs, vocab)
                )
            }
            ParseEvent::GoalFound { width } => {
                format!("  GOAL at width {width}")
            }
            ParseEvent::ParseFailed { positions } => {
                format!("  WARNING no parse over {positions} positions")
            }
            ParseEvent::ForestPruned {
                nodes_before,
                nodes_after,
                edges_before,
                edges_after,
            } => {
                format!(
                    "  PRUNED nodes {nodes_before} -> {nodes_after}, edges {edges_before} -> {edges_after}"
                )
            }
            ParseEvent::Custom { name, message } => {
                format!("  CUSTOM {name}: {message}")
            }
        };

        format!("{prefix}{event_str}")
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether `format_many` puts one record per line.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for one-record-per-line arrays.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord, vocab: &Vocab) -> String {
        let event_data = match &record.event {
            ParseEvent::ParseStart {
                positions,
                grammars,
            } => {
                format!("\"positions\":{positions},\"grammars\":{grammars}")
            }
            ParseEvent::ParseEnd { success } => format!("\"success\":{success}"),
            ParseEvent::ConstraintsActive { spec } => {
                format!("\"spec\":\"{}\"", Self::escape_string(spec))
            }
            ParseEvent::WidthComplete {
                width,
                nodes,
                edges,
            } => {
                format!("\"width\":{width},\"nodes\":{nodes},\"edges\":{edges}")
            }
            ParseEvent::UnaryCycleDropped { grammar, lhs, rhs } => {
                format!(
                    "\"grammar\":\"{}\",\"lhs\":\"{}\",\"rhs\":\"{}\"",
                    Self::escape_string(grammar),
                    Self::escape_string(category_name(*lhs, vocab)),
                    Self::escape_string(category_name(*rhs, vocab))
                )
            }
            ParseEvent::GoalFound { width } => format!("\"width\":{width}"),
            ParseEvent::ParseFailed { positions } => format!("\"positions\":{positions}"),
            ParseEvent::ForestPruned {
                nodes_before,
                nodes_after,
                edges_before,
                edges_after,
            } => {
                format!(
                    "\"nodes_before\":{nodes_before},\"nodes_after\":{nodes_after},\"edges_before\":{edges_before},\"edges_after\":{edges_after}"
                )
            }
            ParseEvent::Custom { name, message } => {
                format!(
                    "\"name\":\"{}\",\"message\":\"{}\"",
                    Self::escape_string(name),
                    Self::escape_string(message)
                )
            }
        };

        format!(
            "{{\"id\":{},\"sentence\":{},\"timestamp_ns\":{},\"type\":\"{}\",{}}}",
            record.id,
            record.sentence,
            record.timestamp_ns,
            record.event_type(),
            event_data
        )
    }

    fn format_many(&self, records: &[&TraceRecord], vocab: &Vocab) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r, vocab)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

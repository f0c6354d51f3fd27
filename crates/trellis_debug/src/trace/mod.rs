//! Tracing for the chart parser.
//!
//! Records parse events in a bounded buffer and does no work at all when
//! disabled. Records can be rendered in human-readable or JSON form.
//!
//! # Example
//!
//! ```
//! use trellis_debug::{ParseEvent, Tracer, TracerConfig};
//!
//! let mut tracer = Tracer::new(TracerConfig::new().enabled());
//! tracer.parse_start(1, 5, 2);
//! tracer.record(ParseEvent::GoalFound { width: 5 });
//! assert_eq!(tracer.buffer().len(), 2);
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{ParseEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use trellis_foundation::{CategoryId, Vocab};

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (traces still recorded in buffer).
    #[default]
    None,
    /// Write each record's type line to stderr.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to output traces.
    pub output: TraceOutput,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Event types to keep (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10_000,
            output: TraceOutput::None,
            json_format: false,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to output to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to use JSON format.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Builder method to filter event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records parser events for one or more sentences.
///
/// [`Tracer::record`] returns immediately when tracing is off.
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_sentence: u64,
    start_time: Instant,
    human_formatter: HumanFormatter,
    json_formatter: JsonFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            current_sentence: 0,
            start_time: Instant::now(),
            human_formatter: HumanFormatter::new().with_timestamps(),
            json_formatter: JsonFormatter::new(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Returns the sentence id new records are tagged with.
    #[must_use]
    pub fn current_sentence(&self) -> u64 {
        self.current_sentence
    }

    /// Sets whether to use JSON output format.
    pub fn set_json_format(&mut self, json: bool) {
        self.config.json_format = json;
    }

    /// Sets the trace output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Records a trace event.
    #[inline]
    pub fn record(&mut self, event: ParseEvent) {
        if !self.config.enabled {
            return;
        }
        self.record_internal(event);
    }

    fn record_internal(&mut self, event: ParseEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|t| t == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_sentence, timestamp_ns, event);

        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                Self::output_record(record);
            }
        }
    }

    /// Writes a short line for `record` to stderr. Full rendering needs the
    /// vocabulary; see [`Tracer::format_record`].
    fn output_record(record: &TraceRecord) {
        let marker = if record.event.is_warning() { "!" } else { " " };
        let _ = writeln!(
            io::stderr(),
            "S{:04} [{:06}]{marker}{}",
            record.sentence,
            record.id,
            record.event_type()
        );
    }

    /// Formats a record using the current format settings.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord, vocab: &Vocab) -> String {
        if self.config.json_format {
            self.json_formatter.format(record, vocab)
        } else {
            self.human_formatter.format(record, vocab)
        }
    }

    /// Formats multiple records.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord], vocab: &Vocab) -> String {
        if self.config.json_format {
            self.json_formatter.format_many(records, vocab)
        } else {
            self.human_formatter.format_many(records, vocab)
        }
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    // -------------------------------------------------------------------------
    // Convenience methods for common events
    // -------------------------------------------------------------------------

    /// Starts a new sentence and records a parse start event.
    #[inline]
    pub fn parse_start(&mut self, sentence: u64, positions: usize, grammars: usize) {
        self.current_sentence = sentence;
        self.record(ParseEvent::ParseStart {
            positions,
            grammars,
        });
    }

    /// Records a parse end event.
    #[inline]
    pub fn parse_end(&mut self, success: bool) {
        self.record(ParseEvent::ParseEnd { success });
    }

    /// Records the end of one span width.
    #[inline]
    pub fn width_complete(&mut self, width: usize, nodes: usize, edges: usize) {
        self.record(ParseEvent::WidthComplete {
            width,
            nodes,
            edges,
        });
    }

    /// Records a unary rule dropped to break a cycle.
    #[inline]
    pub fn unary_cycle_dropped(&mut self, grammar: &str, lhs: CategoryId, rhs: CategoryId) {
        if self.is_enabled() {
            self.record(ParseEvent::UnaryCycleDropped {
                grammar: grammar.to_string(),
                lhs,
                rhs,
            });
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("config", &self.config)
            .field("records", &self.buffer.len())
            .field("current_sentence", &self.current_sentence)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

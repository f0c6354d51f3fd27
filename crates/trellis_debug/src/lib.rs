//! Parse tracing for Trellis.
//!
//! This crate provides:
//! - [`Tracer`] - Ring-buffered recording of parser events
//! - [`HumanFormatter`] / [`JsonFormatter`] - Rendering of trace records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    HumanFormatter, JsonFormatter, ParseEvent, TraceBuffer, TraceBufferStats, TraceFormatter,
    TraceOutput, TraceRecord, Tracer, TracerConfig,
};

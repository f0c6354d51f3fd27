//! Core types for Trellis.
//!
//! This crate provides:
//! - [`Vocab`] - Interning of terminals, categories, and feature names
//! - [`Symbol`] - A terminal or nonterminal on a rule's source side
//! - [`FeatureVector`] - Sparse persistent feature/cost vectors
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod features;
pub mod intern;
pub mod symbol;

pub use error::{Error, ErrorContext, ErrorKind};
pub use features::FeatureVector;
pub use intern::{CategoryId, FeatureId, TerminalId, Vocab};
pub use symbol::Symbol;

/// Result type for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

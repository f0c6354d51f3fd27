//! Exhaustive bottom-up chart parsing for Trellis.
//!
//! This crate provides:
//! - [`ExhaustiveParser`] - Derives every goal-category analysis of a lattice into a forest
//! - [`PassiveChart`] / [`ActiveChart`] - Proved categories and partially matched rules per span
//! - [`ConstraintMask`] - Per-sentence span permissions parsed from metadata
//! - [`UnaryClosure`] - Cycle-free ordering of unary rules across grammars
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use trellis_forest::Forest;
//! use trellis_foundation::{FeatureVector, Symbol, Vocab};
//! use trellis_grammar::{GrammarPtr, Rule, TrieGrammar};
//! use trellis_lattice::Lattice;
//! use trellis_parser::{ExhaustiveParser, ParserConfig};
//!
//! let mut vocab = Vocab::new();
//! let x = vocab.intern_category("X");
//! let hello = Symbol::Terminal(vocab.intern_terminal("hello"));
//! let grammar = TrieGrammar::from_rules("g", [Rule::new(x, vec![hello], FeatureVector::new())]);
//!
//! let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![Arc::new(grammar) as GrammarPtr]);
//! let mut forest = Forest::new();
//! let lattice = Lattice::from_words("hello", &mut vocab);
//! assert!(parser.parse(&lattice, None, &mut forest).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod active;
pub mod chart;
pub mod config;
pub mod constraint;
pub mod metadata;
pub mod parser;
pub mod passive;
pub mod unary;

pub use active::{ActiveChart, DottedItem};
pub use chart::SpanTable;
pub use config::{DEFAULT_CONSTRAINED_GRAMMAR, ParserConfig};
pub use constraint::ConstraintMask;
pub use metadata::SentenceMetadata;
pub use parser::ExhaustiveParser;
pub use passive::PassiveChart;
pub use unary::{UnaryClosure, UnaryRule};

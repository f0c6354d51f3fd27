//! Trellis - Bottom-up chart parsing of word lattices into derivation forests
//!
//! This crate re-exports all layers of the Trellis system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: trellis_parser     - Charts, constraint mask, unary closure, exhaustive parser
//! Layer 3: trellis_forest     - Derivation forest (hypergraph), pruning, summaries
//! Layer 2: trellis_grammar    - Rules, rule tries, the grammar capability interface
//! Layer 1: trellis_lattice    - Weighted word lattices, PLF text format
//!          trellis_debug      - Parse event tracing
//! Layer 0: trellis_foundation - Core types (Vocab, Symbol, FeatureVector, Error)
//! ```

pub use trellis_debug as debug;
pub use trellis_forest as forest;
pub use trellis_foundation as foundation;
pub use trellis_grammar as grammar;
pub use trellis_lattice as lattice;
pub use trellis_parser as parser;

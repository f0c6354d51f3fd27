//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Vocab, Symbol, FeatureVector, and Error.

mod errors;
mod features;

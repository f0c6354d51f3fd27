//! Integration tests for Layer 2: Grammar
//!
//! Tests for rules, rule tries, and the grammar capability interface.

//! Grammar rules and the grammar capability interface for Trellis.
//!
//! The parser never looks inside a grammar's storage. It only needs:
//! - [`Grammar`] - span pre-checks, a trie root, and unary rule lookup
//! - [`TrieNode`] - one-symbol-at-a-time extension yielding completed [`Rule`]s
//!
//! [`TrieGrammar`] is the in-memory implementation used for plain rule
//! sets and glue grammars.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grammar;
pub mod rule;
pub mod trie;

pub use grammar::{Grammar, GrammarPtr, SpanPolicy, TrieGrammar};
pub use rule::{Rule, RulePtr, TargetItem};
pub use trie::{RuleTrie, TrieNode};

//! Per-sentence metadata handed to the parser alongside the lattice.

use std::collections::BTreeMap;

/// SGML attribute holding the constraint string.
pub const CONSTRAINTS_KEY: &str = "constraints";

/// SGML attribute naming the grammar the constraints target.
pub const GRAMMAR_KEY: &str = "grammar";

/// Facts about the sentence being parsed that are not part of the lattice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SentenceMetadata {
    id: u64,
    source_length: usize,
    sgml: BTreeMap<String, String>,
}

impl SentenceMetadata {
    /// Creates metadata for sentence `id` with `source_length` source positions.
    #[must_use]
    pub fn new(id: u64, source_length: usize) -> Self {
        Self {
            id,
            source_length,
            sgml: BTreeMap::new(),
        }
    }

    /// Sets an SGML attribute.
    #[must_use]
    pub fn with_sgml(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.sgml.insert(key.into(), value.into());
        self
    }

    /// Sets the constraint string.
    #[must_use]
    pub fn with_constraints(self, spec: impl Into<String>) -> Self {
        self.with_sgml(CONSTRAINTS_KEY, spec)
    }

    /// Sets the grammar the constraints target.
    #[must_use]
    pub fn with_grammar(self, name: impl Into<String>) -> Self {
        self.with_sgml(GRAMMAR_KEY, name)
    }

    /// Returns the sentence id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the number of source positions.
    #[must_use]
    pub fn source_length(&self) -> usize {
        self.source_length
    }

    /// Returns an SGML attribute.
    #[must_use]
    pub fn sgml_value(&self, key: &str) -> Option<&str> {
        self.sgml.get(key).map(String::as_str)
    }

    /// Returns the constraint string, if present and non-empty.
    #[must_use]
    pub fn constraints(&self) -> Option<&str> {
        self.sgml_value(CONSTRAINTS_KEY).filter(|s| !s.is_empty())
    }

    /// Returns the name of the grammar the constraints target.
    #[must_use]
    pub fn grammar(&self) -> Option<&str> {
        self.sgml_value(GRAMMAR_KEY)
    }
}

//! Vocabulary interning for terminals, categories, and feature names.
//!
//! Every word, nonterminal label, and feature name seen by the parser is
//! interned once so that charts and forests compare small integer ids.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interned terminal (word) identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerminalId(pub(crate) u32);

impl TerminalId {
    /// Reserved epsilon terminal: `<eps>`.
    ///
    /// Lattice arcs labelled with epsilon are crossed without consuming
    /// a grammar symbol.
    pub const EPSILON: TerminalId = TerminalId(0);

    /// Returns the raw index of this terminal.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerminalId({})", self.0)
    }
}

/// Interned nonterminal category identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoryId(pub(crate) u32);

impl CategoryId {
    /// Reserved synthetic goal category: `Goal`.
    ///
    /// Only the parser's goal rule produces this category.
    pub const GOAL: CategoryId = CategoryId(0);

    /// Returns the raw index of this category.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

/// Interned feature name identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureId(pub(crate) u32);

impl FeatureId {
    /// Returns the raw index of this feature.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeatureId({})", self.0)
    }
}

/// Interner for terminals, categories, and feature names.
///
/// The three namespaces are independent: the same string may be both a
/// word and a category. Not thread-safe; build it up front and share it
/// read-only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vocab {
    /// String storage (shared across all namespaces).
    strings: Vec<Arc<str>>,
    /// Map from string to index.
    string_to_index: HashMap<Arc<str>, u32>,
    /// Terminal indices into `strings`.
    terminals: Vec<u32>,
    terminal_map: HashMap<Arc<str>, TerminalId>,
    /// Category indices into `strings`.
    categories: Vec<u32>,
    category_map: HashMap<Arc<str>, CategoryId>,
    /// Feature indices into `strings`.
    features: Vec<u32>,
    feature_map: HashMap<Arc<str>, FeatureId>,
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocab {
    /// Name of the reserved epsilon terminal.
    pub const EPSILON: &'static str = "<eps>";

    /// Name of the reserved synthetic goal category.
    pub const GOAL: &'static str = "Goal";

    /// Creates a new vocabulary with the reserved symbols pre-interned.
    #[must_use]
    pub fn new() -> Self {
        let mut vocab = Self {
            strings: Vec::new(),
            string_to_index: HashMap::new(),
            terminals: Vec::new(),
            terminal_map: HashMap::new(),
            categories: Vec::new(),
            category_map: HashMap::new(),
            features: Vec::new(),
            feature_map: HashMap::new(),
        };

        let eps = vocab.intern_terminal(Self::EPSILON);
        debug_assert_eq!(eps, TerminalId::EPSILON);
        let goal = vocab.intern_category(Self::GOAL);
        debug_assert_eq!(goal, CategoryId::GOAL);

        vocab
    }

    fn intern_string(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.string_to_index.get(s) {
            return idx;
        }

        let idx = u32::try_from(self.strings.len()).expect("too many interned strings");
        let arc: Arc<str> = s.into();
        self.strings.push(arc.clone());
        self.string_to_index.insert(arc, idx);
        idx
    }

    fn get_string(&self, idx: u32) -> Option<&str> {
        self.strings.get(idx as usize).map(AsRef::as_ref)
    }

    /// Interns a terminal, returning its [`TerminalId`].
    ///
    /// # Panics
    ///
    /// Panics if the number of interned terminals exceeds `u32::MAX`.
    pub fn intern_terminal(&mut self, s: &str) -> TerminalId {
        if let Some(&id) = self.terminal_map.get(s) {
            return id;
        }

        let string_idx = self.intern_string(s);
        let idx = u32::try_from(self.terminals.len()).expect("too many terminals");
        self.terminals.push(string_idx);

        let id = TerminalId(idx);
        self.terminal_map.insert(s.into(), id);
        id
    }

    /// Interns a category, returning its [`CategoryId`].
    ///
    /// The name should not include the surrounding brackets.
    ///
    /// # Panics
    ///
    /// Panics if the number of interned categories exceeds `u32::MAX`.
    pub fn intern_category(&mut self, s: &str) -> CategoryId {
        if let Some(&id) = self.category_map.get(s) {
            return id;
        }

        let string_idx = self.intern_string(s);
        let idx = u32::try_from(self.categories.len()).expect("too many categories");
        self.categories.push(string_idx);

        let id = CategoryId(idx);
        self.category_map.insert(s.into(), id);
        id
    }

    /// Interns a feature name, returning its [`FeatureId`].
    ///
    /// # Panics
    ///
    /// Panics if the number of interned features exceeds `u32::MAX`.
    pub fn intern_feature(&mut self, s: &str) -> FeatureId {
        if let Some(&id) = self.feature_map.get(s) {
            return id;
        }

        let string_idx = self.intern_string(s);
        let idx = u32::try_from(self.features.len()).expect("too many features");
        self.features.push(string_idx);

        let id = FeatureId(idx);
        self.feature_map.insert(s.into(), id);
        id
    }

    /// Looks up a terminal without interning it.
    #[must_use]
    pub fn terminal(&self, s: &str) -> Option<TerminalId> {
        self.terminal_map.get(s).copied()
    }

    /// Looks up a category without interning it.
    #[must_use]
    pub fn category(&self, s: &str) -> Option<CategoryId> {
        self.category_map.get(s).copied()
    }

    /// Looks up a feature without interning it.
    #[must_use]
    pub fn feature(&self, s: &str) -> Option<FeatureId> {
        self.feature_map.get(s).copied()
    }

    /// Gets the string for a terminal.
    #[must_use]
    pub fn terminal_name(&self, id: TerminalId) -> Option<&str> {
        self.terminals
            .get(id.0 as usize)
            .and_then(|&idx| self.get_string(idx))
    }

    /// Gets the string for a category.
    #[must_use]
    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .get(id.0 as usize)
            .and_then(|&idx| self.get_string(idx))
    }

    /// Gets the string for a feature.
    #[must_use]
    pub fn feature_name(&self, id: FeatureId) -> Option<&str> {
        self.features
            .get(id.0 as usize)
            .and_then(|&idx| self.get_string(idx))
    }

    /// Returns the number of interned terminals.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Returns the number of interned categories.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Returns the number of interned features.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

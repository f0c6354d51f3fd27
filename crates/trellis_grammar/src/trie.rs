//! Rule tries: grammar positions reached by matching source symbols.

use std::collections::HashMap;

use trellis_foundation::Symbol;

use crate::rule::RulePtr;

/// A position in a grammar's rule trie.
///
/// A dotted item in the parser's active chart holds one of these. Each
/// step consumes one source symbol; a position that completes rules
/// reports them through [`TrieNode::rules`].
pub trait TrieNode {
    /// Follows the transition on `symbol`, if the grammar has one.
    fn extend(&self, symbol: Symbol) -> Option<&dyn TrieNode>;

    /// Returns the rules whose source side ends exactly here.
    fn rules(&self) -> Option<&[RulePtr]>;
}

/// In-memory rule trie keyed by source symbols.
#[derive(Debug, Default)]
pub struct RuleTrie {
    children: HashMap<Symbol, RuleTrie>,
    rules: Vec<RulePtr>,
}

impl RuleTrie {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule under its source side.
    pub fn insert(&mut self, rule: RulePtr) {
        let mut node = self;
        for &symbol in rule.source() {
            node = node.children.entry(symbol).or_default();
        }
        node.rules.push(rule);
    }

    /// Returns the number of rules stored in the whole trie.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len() + self.children.values().map(RuleTrie::len).sum::<usize>()
    }

    /// Returns true if the trie holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TrieNode for RuleTrie {
    fn extend(&self, symbol: Symbol) -> Option<&dyn TrieNode> {
        self.children.get(&symbol).map(|c| c as &dyn TrieNode)
    }

    fn rules(&self) -> Option<&[RulePtr]> {
        if self.rules.is_empty() {
            None
        } else {
            Some(&self.rules)
        }
    }
}

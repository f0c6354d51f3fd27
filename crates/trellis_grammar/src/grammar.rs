//! The grammar capability interface and its in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use trellis_foundation::{CategoryId, FeatureId, FeatureVector, Symbol};

use crate::rule::{Rule, RulePtr};
use crate::trie::{RuleTrie, TrieNode};

/// Shared handle to a grammar. Grammars are read-only during a parse.
pub type GrammarPtr = Arc<dyn Grammar>;

// =============================================================================
// Grammar Trait
// =============================================================================

/// What the chart parser needs from a grammar.
pub trait Grammar {
    /// Identifying name, used to select grammars for constraint filtering.
    fn name(&self) -> &str;

    /// Cheap pre-check: could any rule apply over span `(i, j)` whose
    /// shortest lattice path has `distance` arcs?
    ///
    /// Called with `i == j` and `distance == 0` to decide where rules may start.
    fn has_rule_for_span(&self, i: usize, j: usize, distance: usize) -> bool;

    /// Root of the rule trie (nothing matched yet).
    fn root(&self) -> &dyn TrieNode;

    /// All unary rules, in insertion order.
    fn unary_rules(&self) -> &[RulePtr];

    /// Unary rules whose single right-hand-side category is `category`.
    fn unary_rules_for_rhs(&self, category: CategoryId) -> &[RulePtr];
}

// =============================================================================
// Span Policy
// =============================================================================

/// Where a [`TrieGrammar`]'s rules may start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpanPolicy {
    /// Any span start.
    #[default]
    Anywhere,
    /// Only spans starting at position 0 (glue grammars).
    StartOnly,
}

// =============================================================================
// Trie Grammar
// =============================================================================

/// A grammar stored as a source-side rule trie.
///
/// Unary rules are kept out of the trie; the parser applies them during
/// unary closure instead.
#[derive(Debug)]
pub struct TrieGrammar {
    name: String,
    root: RuleTrie,
    unaries: Vec<RulePtr>,
    rhs_to_unaries: HashMap<CategoryId, Vec<RulePtr>>,
    max_span: Option<usize>,
    policy: SpanPolicy,
}

impl TrieGrammar {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: RuleTrie::new(),
            unaries: Vec::new(),
            rhs_to_unaries: HashMap::new(),
            max_span: None,
            policy: SpanPolicy::Anywhere,
        }
    }

    /// Creates a grammar holding `rules`.
    #[must_use]
    pub fn from_rules(name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut grammar = Self::new(name);
        for rule in rules {
            grammar.add_rule(rule);
        }
        grammar
    }

    /// Creates a glue grammar: `[goal] ||| [goal,1] [X,2]` and
    /// `[goal] ||| [X,1]` for every category `X`, restricted to spans
    /// starting at 0.
    ///
    /// If `glue_feature` is given, the binary rules carry it with value 1.
    #[must_use]
    pub fn glue(
        name: impl Into<String>,
        goal: CategoryId,
        categories: &[CategoryId],
        glue_feature: Option<FeatureId>,
    ) -> Self {
        let mut grammar = Self::new(name).with_span_policy(SpanPolicy::StartOnly);
        let binary_features = glue_feature
            .map(|f| FeatureVector::new().with(f, 1.0))
            .unwrap_or_default();
        for &cat in categories {
            grammar.add_rule(Rule::new(
                goal,
                vec![Symbol::NonTerminal(goal), Symbol::NonTerminal(cat)],
                binary_features.clone(),
            ));
            grammar.add_rule(Rule::new(
                goal,
                vec![Symbol::NonTerminal(cat)],
                FeatureVector::new(),
            ));
        }
        grammar
    }

    /// Limits rules to spans of at most `max_span` lattice arcs.
    #[must_use]
    pub fn with_max_span(mut self, max_span: usize) -> Self {
        self.max_span = Some(max_span);
        self
    }

    /// Sets where rules may start.
    #[must_use]
    pub fn with_span_policy(mut self, policy: SpanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a rule.
    pub fn add_rule(&mut self, rule: impl Into<RulePtr>) {
        let rule = rule.into();
        if let Some(rhs) = rule.unary_rhs() {
            self.rhs_to_unaries
                .entry(rhs)
                .or_default()
                .push(Arc::clone(&rule));
            self.unaries.push(rule);
        } else {
            self.root.insert(rule);
        }
    }

    /// Returns the total number of rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.root.len() + self.unaries.len()
    }

    /// Returns the span limit, if any.
    #[must_use]
    pub fn max_span(&self) -> Option<usize> {
        self.max_span
    }
}

impl Grammar for TrieGrammar {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_rule_for_span(&self, i: usize, _j: usize, distance: usize) -> bool {
        let start_ok = match self.policy {
            SpanPolicy::Anywhere => true,
            SpanPolicy::StartOnly => i == 0,
        };
        start_ok && self.max_span.is_none_or(|max| distance <= max)
    }

    fn root(&self) -> &dyn TrieNode {
        &self.root
    }

    fn unary_rules(&self) -> &[RulePtr] {
        &self.unaries
    }

    fn unary_rules_for_rhs(&self, category: CategoryId) -> &[RulePtr] {
        self.rhs_to_unaries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

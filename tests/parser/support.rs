//! Shared grammar builders for parser tests.

use std::sync::Arc;

use trellis_forest::{Forest, NodeId};
use trellis_foundation::{CategoryId, FeatureVector, Symbol, Vocab};
use trellis_grammar::{GrammarPtr, Rule, TrieGrammar};

pub fn nt(c: CategoryId) -> Symbol {
    Symbol::NonTerminal(c)
}

pub fn word(vocab: &mut Vocab, w: &str) -> Symbol {
    Symbol::Terminal(vocab.intern_terminal(w))
}

pub fn rule(lhs: CategoryId, source: Vec<Symbol>) -> Rule {
    Rule::new(lhs, source, FeatureVector::new())
}

/// `X -> X X` plus `X -> w` for every word.
pub fn binary_x(vocab: &mut Vocab, name: &str, words: &[&str]) -> (TrieGrammar, CategoryId) {
    let x = vocab.intern_category("X");
    let mut grammar = TrieGrammar::new(name);
    grammar.add_rule(rule(x, vec![nt(x), nt(x)]));
    for w in words {
        let w = word(vocab, w);
        grammar.add_rule(rule(x, vec![w]));
    }
    (grammar, x)
}

pub fn ptr(grammar: TrieGrammar) -> GrammarPtr {
    Arc::new(grammar)
}

/// The node the goal node wraps.
pub fn top(forest: &Forest) -> NodeId {
    let goal = forest.goal().expect("parsed forest has a goal");
    let edge = forest.edge(forest.node(goal).in_edges[0]);
    edge.tail[0]
}

/// Number of nodes with `category` over `span`.
pub fn count_nodes(forest: &Forest, category: CategoryId, span: (usize, usize)) -> usize {
    forest
        .nodes()
        .iter()
        .filter(|n| n.category == category && n.span == span)
        .count()
}

//! Concrete derivation scenarios

use trellis_forest::{Forest, ForestStats};
use trellis_foundation::{CategoryId, Vocab};
use trellis_grammar::TrieGrammar;
use trellis_lattice::Lattice;
use trellis_parser::{ExhaustiveParser, ParserConfig};

use crate::support::{binary_x, count_nodes, nt, ptr, rule, top, word};

// =============================================================================
// Binary and Unary Rules
// =============================================================================

#[test]
fn binary_rule_over_two_words() {
    let mut vocab = Vocab::new();
    let s = vocab.intern_category("S");
    let a = vocab.intern_category("A");
    let b = vocab.intern_category("B");
    let grammar = TrieGrammar::from_rules(
        "g",
        [
            rule(a, vec![word(&mut vocab, "a")]),
            rule(b, vec![word(&mut vocab, "b")]),
            rule(s, vec![nt(a), nt(b)]),
        ],
    );
    let lattice = Lattice::from_words("a b", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(s), vec![ptr(grammar)]);
    let mut forest = Forest::new();

    assert!(parser.parse(&lattice, None, &mut forest).unwrap());

    let binaries: Vec<_> = forest.edges().iter().filter(|e| e.arity() == 2).collect();
    assert_eq!(binaries.len(), 1);
    assert_eq!(binaries[0].span, (0, 2));
    assert_eq!(forest.node(binaries[0].head.unwrap()).category, s);
    assert_eq!(forest.node(top(&forest)).category, s);

    // Only the two lexical rules cover single words
    let narrow = forest
        .edges()
        .iter()
        .filter(|e| e.span.1 - e.span.0 == 1)
        .count();
    assert_eq!(narrow, 2);
}

#[test]
fn unary_cycle_is_broken() {
    let mut vocab = Vocab::new();
    let s = vocab.intern_category("S");
    let a = vocab.intern_category("A");
    let b = vocab.intern_category("B");
    let grammar = TrieGrammar::from_rules(
        "g",
        [
            rule(a, vec![word(&mut vocab, "a")]),
            rule(b, vec![nt(a)]),
            rule(a, vec![nt(b)]),
            rule(s, vec![nt(a)]),
            rule(s, vec![nt(b)]),
        ],
    );
    let lattice = Lattice::from_words("a", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(s), vec![ptr(grammar)]);
    let mut forest = Forest::new();

    assert!(parser.parse(&lattice, None, &mut forest).unwrap());
    assert_eq!(parser.unary_closure().dropped().len(), 1);
    assert_eq!(count_nodes(&forest, a, (0, 1)), 1);
    assert_eq!(count_nodes(&forest, b, (0, 1)), 1);
    assert_eq!(count_nodes(&forest, s, (0, 1)), 1);
    assert!(forest.topological_order().is_some());
}

#[test]
fn unary_chain_reaches_goal() {
    let mut vocab = Vocab::new();
    let s = vocab.intern_category("S");
    let np = vocab.intern_category("NP");
    let n = vocab.intern_category("N");
    // Declared top-down
    let grammar = TrieGrammar::from_rules(
        "g",
        [
            rule(s, vec![nt(np)]),
            rule(np, vec![nt(n)]),
            rule(n, vec![word(&mut vocab, "haus")]),
        ],
    );
    let lattice = Lattice::from_words("haus", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(s), vec![ptr(grammar)]);
    let mut forest = Forest::new();

    assert!(parser.parse(&lattice, None, &mut forest).unwrap());
    assert_eq!(forest.node_count(), 4);
    assert_eq!(forest.edge_count(), 4);
}

#[test]
fn unary_rule_over_goal_category_feeds_a_wider_goal() {
    let mut vocab = Vocab::new();
    let s = vocab.intern_category("S");
    let x = vocab.intern_category("X");
    let grammar = TrieGrammar::from_rules(
        "g",
        [
            rule(s, vec![word(&mut vocab, "a")]),
            rule(x, vec![nt(s)]),
            rule(s, vec![nt(x), word(&mut vocab, "b")]),
        ],
    );
    let lattice = Lattice::from_words("a b", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(s), vec![ptr(grammar)]);
    assert_eq!(parser.unary_closure().len(), 1);
    assert!(parser.unary_closure().dropped().is_empty());

    let mut forest = Forest::new();
    assert!(parser.parse(&lattice, None, &mut forest).unwrap());
    assert_eq!(count_nodes(&forest, x, (0, 1)), 1);
    assert_eq!(count_nodes(&forest, s, (0, 2)), 1);
}

// =============================================================================
// Ambiguity
// =============================================================================

#[test]
fn ambiguous_splits_share_nodes() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a"]);
    let lattice = Lattice::from_words("a a a", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![ptr(grammar)]);
    let mut forest = Forest::new();

    assert!(parser.parse(&lattice, None, &mut forest).unwrap());
    assert_eq!(forest.node(top(&forest)).in_edges.len(), 2);
    assert_eq!(forest.node_count(), 7);
    assert_eq!(forest.edge_count(), 8);

    let stats = ForestStats::of(&forest);
    assert_eq!(stats.max_arity, 2);
    assert_eq!(stats.edges_by_width.get(&3), Some(&3));
}

#[test]
fn every_span_has_one_node_per_category() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a", "b"]);
    let lattice = Lattice::from_words("a b a b a", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![ptr(grammar)]);
    let mut forest = Forest::new();

    assert!(parser.parse(&lattice, None, &mut forest).unwrap());
    for i in 0..5 {
        for j in i + 1..=5 {
            assert_eq!(count_nodes(&forest, x, (i, j)), 1, "span ({i},{j})");
        }
    }
    // One edge per split point
    assert_eq!(forest.node(top(&forest)).in_edges.len(), 4);
}

// =============================================================================
// Failure
// =============================================================================

#[test]
fn uncovered_word_is_no_parse() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a"]);
    let lattice = Lattice::from_words("a z a", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![ptr(grammar)]);
    let mut forest = Forest::new();

    assert!(!parser.parse(&lattice, None, &mut forest).unwrap());
    assert!(forest.goal().is_none());
    // Partial analyses stay in the unpruned forest
    assert_eq!(count_nodes(&forest, x, (0, 1)), 1);
    assert_eq!(count_nodes(&forest, x, (2, 3)), 1);
}

#[test]
fn empty_lattice_is_no_parse() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a"]);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![ptr(grammar)]);
    let mut forest = Forest::new();

    assert!(!parser.parse(&Lattice::default(), None, &mut forest).unwrap());
    assert!(forest.is_empty());
}

#[test]
fn goal_category_in_grammar_twice_fails() {
    let mut vocab = Vocab::new();
    let s = vocab.intern_category("S");
    let grammar = TrieGrammar::from_rules(
        "g",
        [rule(CategoryId::GOAL, vec![word(&mut vocab, "a")])],
    );
    let lattice = Lattice::from_words("a a", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(s), vec![ptr(grammar)]);

    let err = parser
        .parse(&lattice, None, &mut Forest::new())
        .unwrap_err();
    assert!(format!("{err}").contains("goal node already exists"));
}

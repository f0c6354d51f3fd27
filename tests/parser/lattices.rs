//! Parsing lattice input: multi-word arcs, epsilon arcs, and PLF text

use trellis_forest::{Forest, edge_signatures};
use trellis_foundation::{Symbol, Vocab};
use trellis_grammar::TrieGrammar;
use trellis_lattice::{Lattice, LatticeArc, parse_plf};
use trellis_parser::{ExhaustiveParser, ParserConfig};

use crate::support::{binary_x, count_nodes, nt, ptr, rule, top, word};

#[test]
fn multiword_arc_competes_with_word_pair() {
    let mut vocab = Vocab::new();
    let (mut grammar, x) = binary_x(&mut vocab, "g", &["a", "b", "a_b"]);
    grammar.add_rule(rule(x, vec![word(&mut vocab, "a"), word(&mut vocab, "b")]));
    let lattice = parse_plf("((('a',0,1),('a_b',-1,2),),(('b',0,1),),)", &mut vocab).unwrap();

    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![ptr(grammar)]);
    let mut forest = Forest::new();
    assert!(parser.parse(&lattice, None, &mut forest).unwrap());

    // X -> X X, X -> a b, and X -> a_b all derive the one X over (0,2)
    let node = top(&forest);
    assert_eq!(forest.node(node).span, (0, 2));
    assert_eq!(forest.node(node).in_edges.len(), 3);
    assert_eq!(count_nodes(&forest, x, (0, 2)), 1);
}

#[test]
fn lattice_cost_lands_on_edges() {
    let mut vocab = Vocab::new();
    let cost = vocab.intern_feature("LatticeCost");
    let (grammar, x) = binary_x(&mut vocab, "g", &["das", "die", "haus"]);
    let lattice = parse_plf(
        "((('das',0,1),('die',-0.5,1),),(('haus',0,1),),)",
        &mut vocab,
    )
    .unwrap();
    let config = ParserConfig::new(x).with_lattice_cost_feature(cost);
    let mut parser = ExhaustiveParser::new(config, vec![ptr(grammar)]);
    let mut forest = Forest::new();
    assert!(parser.parse(&lattice, None, &mut forest).unwrap());

    let die = vocab.terminal("die").unwrap();
    let costed: Vec<_> = forest
        .edges()
        .iter()
        .filter(|e| e.features.get(cost) != 0.0)
        .collect();
    assert_eq!(costed.len(), 1);
    assert_eq!(costed[0].rule.source(), &[Symbol::Terminal(die)]);
    assert!((costed[0].features.get(cost) + 0.5).abs() < f64::EPSILON);
}

#[test]
fn epsilon_positions_are_transparent() {
    let mut vocab = Vocab::new();
    let x = vocab.intern_category("X");
    let grammar = TrieGrammar::from_rules(
        "g",
        [rule(x, vec![word(&mut vocab, "a"), word(&mut vocab, "b")])],
    );
    let lattice = parse_plf(
        "((('a',0,1),),(('<eps>',0,1),),(('b',0,1),),)",
        &mut vocab,
    )
    .unwrap();

    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![ptr(grammar)]);
    let mut forest = Forest::new();
    assert!(parser.parse(&lattice, None, &mut forest).unwrap());
    assert_eq!(forest.node(top(&forest)).span, (0, 3));
}

#[test]
fn plf_sentence_matches_plain_sentence() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a", "b"]);
    let grammar = ptr(grammar);
    let plain = Lattice::from_words("a b b a", &mut vocab);
    let plf = parse_plf(
        "((('a',0,1),),(('b',0,1),),(('b',0,1),),(('a',0,1),),)",
        &mut vocab,
    )
    .unwrap();
    assert!(plf.is_linear());

    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![grammar]);
    let mut from_plain = Forest::new();
    let mut from_plf = Forest::new();
    assert!(parser.parse(&plain, None, &mut from_plain).unwrap());
    assert!(parser.parse(&plf, None, &mut from_plf).unwrap());

    assert_eq!(
        edge_signatures(&from_plain, &vocab),
        edge_signatures(&from_plf, &vocab)
    );
}

#[test]
fn span_limit_counts_lattice_arcs() {
    let mut vocab = Vocab::new();
    let s = vocab.intern_category("S");
    let x = vocab.intern_category("X");
    let a = vocab.intern_terminal("a");
    let bc = vocab.intern_terminal("b_c");
    let b = vocab.intern_terminal("b");
    let c = vocab.intern_terminal("c");
    // S -> X X limited to two arcs
    let grammar = TrieGrammar::from_rules(
        "g",
        [
            rule(s, vec![nt(x), nt(x)]),
            rule(x, vec![word(&mut vocab, "a")]),
            rule(x, vec![word(&mut vocab, "b_c")]),
        ],
    )
    .with_max_span(2);
    let lattice = Lattice::new(vec![
        vec![LatticeArc::word(a)],
        vec![LatticeArc::word(b), LatticeArc::new(bc, 0.0, 2)],
        vec![LatticeArc::word(c)],
    ])
    .unwrap();

    // Three positions wide, but only two arcs via "b_c"
    let mut parser = ExhaustiveParser::new(ParserConfig::new(s), vec![ptr(grammar)]);
    let mut forest = Forest::new();
    assert!(parser.parse(&lattice, None, &mut forest).unwrap());
    assert_eq!(forest.node(top(&forest)).span, (0, 3));
}

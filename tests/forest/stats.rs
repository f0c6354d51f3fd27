//! Integration tests for ForestStats and EdgeSignature

use std::sync::Arc;

use trellis_forest::{Forest, ForestStats, edge_signatures};
use trellis_foundation::{CategoryId, FeatureVector, Symbol, Vocab};
use trellis_grammar::Rule;

#[test]
fn empty_forest_stats() {
    let stats = ForestStats::of(&Forest::new());
    assert_eq!(stats, ForestStats::default());
    assert_eq!(stats.to_string(), "0 nodes, 0 edges, max arity 0");
}

#[test]
fn signatures_ignore_creation_order() {
    let mut vocab = Vocab::new();
    let x = vocab.intern_category("X");
    let y = vocab.intern_category("Y");
    let w = Symbol::Terminal(vocab.intern_terminal("w"));
    let to_x = Arc::new(Rule::new(x, vec![w], FeatureVector::new()));
    let to_y = Arc::new(Rule::new(y, vec![w], FeatureVector::new()));

    let build = |x_first: bool| {
        let mut forest = Forest::new();
        let order = if x_first { [&to_x, &to_y] } else { [&to_y, &to_x] };
        for rule in order {
            let node = forest.add_node(rule.lhs(), (0, 1));
            let e = forest.add_edge(Arc::clone(rule), vec![]).unwrap();
            forest.edge_mut(e).span = (0, 1);
            forest.connect(e, node);
        }
        forest
    };

    let first = build(true);
    let second = build(false);
    assert_ne!(first.nodes()[0].category, second.nodes()[0].category);
    assert_eq!(edge_signatures(&first, &vocab), edge_signatures(&second, &vocab));
}

#[test]
fn signature_display_names_tail() {
    let mut vocab = Vocab::new();
    let x = vocab.intern_category("X");
    let w = Symbol::Terminal(vocab.intern_terminal("w"));
    let mut forest = Forest::new();

    let leaf = forest.add_node(x, (0, 1));
    let e = forest
        .add_edge(Arc::new(Rule::new(x, vec![w], FeatureVector::new())), vec![])
        .unwrap();
    forest.edge_mut(e).span = (0, 1);
    forest.connect(e, leaf);

    let goal = forest.add_node(CategoryId::GOAL, (0, 1));
    let e = forest
        .add_edge(Arc::new(Rule::goal(CategoryId::GOAL, x)), vec![leaf])
        .unwrap();
    forest.edge_mut(e).span = (0, 1);
    forest.connect(e, goal);

    let lines: Vec<String> = edge_signatures(&forest, &vocab)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "Goal(0, 1) <- [Goal] ||| [X,1] ||| [X,1] X(0, 1)".to_string(),
            "X(0, 1) <- [X] ||| w ||| w".to_string(),
        ]
    );

    let stats = ForestStats::of(&forest);
    assert_eq!(stats.max_arity, 1);
    assert_eq!(stats.edges_by_width.get(&1), Some(&2));
}

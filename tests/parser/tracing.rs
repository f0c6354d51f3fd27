//! Parse tracing

use trellis_debug::{ParseEvent, TraceRecord, TracerConfig};
use trellis_forest::Forest;
use trellis_foundation::Vocab;
use trellis_grammar::TrieGrammar;
use trellis_lattice::Lattice;
use trellis_parser::{DEFAULT_CONSTRAINED_GRAMMAR, ExhaustiveParser, ParserConfig, SentenceMetadata};

use crate::support::{binary_x, nt, ptr, rule, word};

fn event_types(parser: &ExhaustiveParser) -> Vec<&'static str> {
    parser
        .tracer()
        .buffer()
        .iter()
        .map(TraceRecord::event_type)
        .collect()
}

#[test]
fn disabled_by_default() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a"]);
    let lattice = Lattice::from_words("a a", &mut vocab);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(x), vec![ptr(grammar)]);

    assert!(parser.parse(&lattice, None, &mut Forest::new()).unwrap());
    assert!(!parser.tracer().is_enabled());
    assert!(parser.tracer().buffer().is_empty());
}

#[test]
fn successful_parse_events() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a"]);
    let lattice = Lattice::from_words("a a", &mut vocab);
    let config = ParserConfig::new(x).with_trace(TracerConfig::new().enabled());
    let mut parser = ExhaustiveParser::new(config, vec![ptr(grammar)]);

    assert!(parser.parse(&lattice, None, &mut Forest::new()).unwrap());
    assert_eq!(
        event_types(&parser),
        vec![
            "parse-start",
            "width-complete",
            "width-complete",
            "goal-found",
            "forest-pruned",
            "parse-end",
        ]
    );

    let last = parser.tracer().buffer().last().unwrap();
    assert!(matches!(last.event, ParseEvent::ParseEnd { success: true }));
    assert!(
        parser
            .tracer()
            .format_record(last, &vocab)
            .contains("PARSE END (OK)")
    );
}

#[test]
fn failed_parse_events() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, DEFAULT_CONSTRAINED_GRAMMAR, &["a"]);
    let lattice = Lattice::from_words("a a", &mut vocab);
    let config = ParserConfig::new(x).with_trace(TracerConfig::new().enabled());
    let mut parser = ExhaustiveParser::new(config, vec![ptr(grammar)]);

    let meta = SentenceMetadata::new(3, 2).with_constraints("0;1");
    assert!(!parser.parse(&lattice, Some(&meta), &mut Forest::new()).unwrap());
    assert_eq!(
        event_types(&parser),
        vec![
            "parse-start",
            "constraints-active",
            "width-complete",
            "width-complete",
            "parse-failed",
            "parse-end",
        ]
    );
    assert_eq!(parser.tracer().buffer().sentences(), vec![3]);
    assert!(parser.tracer().buffer().iter().any(|r| r.event.is_warning()));
}

#[test]
fn dropped_unary_rules_are_reported() {
    let mut vocab = Vocab::new();
    let a = vocab.intern_category("A");
    let b = vocab.intern_category("B");
    let grammar = TrieGrammar::from_rules(
        "cyclic",
        [
            rule(b, vec![nt(a)]),
            rule(a, vec![nt(b)]),
            rule(a, vec![word(&mut vocab, "a")]),
        ],
    );
    let config = ParserConfig::new(a).with_trace(TracerConfig::new().enabled());
    let parser = ExhaustiveParser::new(config, vec![ptr(grammar)]);

    let records = parser.tracer().buffer().by_event_type("unary-cycle-dropped");
    assert_eq!(records.len(), 1);
    let text = parser.tracer().format_record(records[0], &vocab);
    assert!(text.contains("[A] -> [B]"));
    assert!(text.contains("cyclic"));
}

#[test]
fn event_filter_and_json() {
    let mut vocab = Vocab::new();
    let (grammar, x) = binary_x(&mut vocab, "g", &["a"]);
    let lattice = Lattice::from_words("a a a", &mut vocab);
    let trace = TracerConfig::new()
        .enabled()
        .json()
        .filter_events(vec!["goal-found".to_string()]);
    let mut parser = ExhaustiveParser::new(ParserConfig::new(x).with_trace(trace), vec![ptr(grammar)]);

    let meta = SentenceMetadata::new(17, 3);
    assert!(parser.parse(&lattice, Some(&meta), &mut Forest::new()).unwrap());

    let records: Vec<&TraceRecord> = parser.tracer().buffer().iter().collect();
    assert_eq!(records.len(), 1);
    let json = parser.tracer().format_record(records[0], &vocab);
    assert!(json.contains("\"sentence\":17"));
    assert!(json.contains("\"type\":\"goal-found\""));
    assert!(json.contains("\"width\":3"));
}

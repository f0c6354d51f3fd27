//! Integration tests for Lattice construction and distances

use trellis_foundation::{ErrorKind, Vocab};
use trellis_lattice::{Lattice, LatticeArc};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn sentence_is_linear() {
    let mut vocab = Vocab::new();
    let lattice = Lattice::from_words("das haus ist klein", &mut vocab);
    assert_eq!(lattice.len(), 4);
    assert!(lattice.is_linear());
    let words = lattice.to_sentence().unwrap();
    assert_eq!(vocab.terminal_name(words[1]), Some("haus"));
}

#[test]
fn empty_sentence() {
    let mut vocab = Vocab::new();
    let lattice = Lattice::from_words("   ", &mut vocab);
    assert!(lattice.is_empty());
    assert_eq!(lattice.to_sentence(), Some(vec![]));
}

#[test]
fn zero_span_arc_rejected() {
    let mut vocab = Vocab::new();
    let w = vocab.intern_terminal("w");
    let err = Lattice::new(vec![vec![LatticeArc::new(w, 0.0, 0)]]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArc { position: 0, .. }));
}

#[test]
fn overlong_arc_rejected() {
    let mut vocab = Vocab::new();
    let w = vocab.intern_terminal("w");
    let err = Lattice::new(vec![
        vec![LatticeArc::word(w)],
        vec![LatticeArc::new(w, 0.0, 2)],
    ])
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArc { position: 1, .. }));
}

#[test]
fn alternatives_make_lattice_non_linear() {
    let mut vocab = Vocab::new();
    let a = vocab.intern_terminal("a");
    let b = vocab.intern_terminal("b");
    let lattice = Lattice::new(vec![vec![LatticeArc::word(a), LatticeArc::word(b)]]).unwrap();
    assert!(!lattice.is_linear());
    assert!(lattice.to_sentence().is_none());
    assert_eq!(lattice.arcs(0).len(), 2);
}

// =============================================================================
// Distances
// =============================================================================

#[test]
fn linear_distance_is_width() {
    let mut vocab = Vocab::new();
    let lattice = Lattice::from_words("a b c", &mut vocab);
    assert_eq!(lattice.distance(0, 3), 3);
    assert_eq!(lattice.distance(1, 2), 1);
    assert_eq!(lattice.distance(2, 2), 0);
}

#[test]
fn multiword_arc_shortens_distance() {
    let mut vocab = Vocab::new();
    let a = vocab.intern_terminal("a");
    let bc = vocab.intern_terminal("b_c");
    let b = vocab.intern_terminal("b");
    let c = vocab.intern_terminal("c");
    let lattice = Lattice::new(vec![
        vec![LatticeArc::word(a)],
        vec![LatticeArc::word(b), LatticeArc::new(bc, -0.3, 2)],
        vec![LatticeArc::word(c)],
    ])
    .unwrap();

    assert_eq!(lattice.distance(0, 3), 2);
    assert_eq!(lattice.distance(1, 3), 1);
    assert_eq!(lattice.distance(0, 2), 2);
}

#[test]
fn skipped_position_is_unreachable() {
    let mut vocab = Vocab::new();
    let ab = vocab.intern_terminal("a_b");
    let c = vocab.intern_terminal("c");
    let lattice = Lattice::new(vec![
        vec![LatticeArc::new(ab, 0.0, 2)],
        vec![],
        vec![LatticeArc::word(c)],
    ])
    .unwrap();

    assert_eq!(lattice.distance(0, 1), usize::MAX);
    assert_eq!(lattice.distance(0, 3), 2);
}

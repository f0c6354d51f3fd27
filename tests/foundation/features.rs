//! Integration tests for FeatureVector
//!
//! Tests sparse storage, arithmetic, and rendering.

use trellis_foundation::{FeatureVector, Vocab};

#[test]
fn absent_features_are_zero() {
    let mut vocab = Vocab::new();
    let lm = vocab.intern_feature("LanguageModel");
    let v = FeatureVector::new();
    assert!(v.is_empty());
    assert!(v.get(lm).abs() < f64::EPSILON);
}

#[test]
fn setting_zero_removes() {
    let mut vocab = Vocab::new();
    let lm = vocab.intern_feature("LanguageModel");
    let mut v = FeatureVector::new().with(lm, 2.0);
    assert_eq!(v.len(), 1);
    v.set(lm, 0.0);
    assert!(v.is_empty());
}

#[test]
fn add_cancels_to_nothing() {
    let mut vocab = Vocab::new();
    let pass = vocab.intern_feature("PassThrough");
    let mut v = FeatureVector::new();
    v.add(pass, 1.5);
    v.add(pass, -1.5);
    assert!(v.is_empty());
}

#[test]
fn add_all_and_dot() {
    let mut vocab = Vocab::new();
    let a = vocab.intern_feature("A");
    let b = vocab.intern_feature("B");
    let c = vocab.intern_feature("C");

    let mut v = FeatureVector::new().with(a, 1.0).with(b, 2.0);
    v.add_all(&FeatureVector::new().with(b, 1.0).with(c, -1.0));
    assert_eq!(v.len(), 3);
    assert!((v.get(b) - 3.0).abs() < f64::EPSILON);

    let weights: FeatureVector = [(a, 0.5), (c, 2.0)].into_iter().collect();
    assert!((v.dot(&weights) - (0.5 - 2.0)).abs() < 1e-12);
    assert!((weights.dot(&v) - v.dot(&weights)).abs() < 1e-12);
}

#[test]
fn clones_are_independent() {
    let mut vocab = Vocab::new();
    let a = vocab.intern_feature("A");
    let base = FeatureVector::new().with(a, 1.0);
    let mut copy = base.clone();
    copy.set(a, 4.0);
    assert!((base.get(a) - 1.0).abs() < f64::EPSILON);
    assert!((copy.get(a) - 4.0).abs() < f64::EPSILON);
}

#[test]
fn renders_with_names() {
    let mut vocab = Vocab::new();
    let a = vocab.intern_feature("EGivenF");
    let v = FeatureVector::new().with(a, 0.5);
    assert_eq!(v.to_string_with(&vocab), "EGivenF=0.5");
}

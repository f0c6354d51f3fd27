//! Sparse feature vectors with structural sharing.
//!
//! Every forest edge starts from its rule's static features, so the vector
//! is a thin wrapper around `im::OrdMap`: cloning is O(1) and an edge only
//! pays for the entries it changes (e.g. the lattice cost).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intern::{FeatureId, Vocab};

/// Sparse map from feature to real value. Absent features are zero.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureVector(im::OrdMap<FeatureId, f64>);

impl FeatureVector {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdMap::new())
    }

    /// Returns the number of non-zero entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if every feature is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a feature value, zero if absent.
    #[must_use]
    pub fn get(&self, feature: FeatureId) -> f64 {
        self.0.get(&feature).copied().unwrap_or(0.0)
    }

    /// Sets a feature value. Setting zero removes the entry.
    pub fn set(&mut self, feature: FeatureId, value: f64) {
        if value == 0.0 {
            self.0.remove(&feature);
        } else {
            self.0.insert(feature, value);
        }
    }

    /// Adds `value` to a feature.
    pub fn add(&mut self, feature: FeatureId, value: f64) {
        let sum = self.get(feature) + value;
        self.set(feature, sum);
    }

    /// Returns a new vector with `feature` set to `value`.
    #[must_use]
    pub fn with(&self, feature: FeatureId, value: f64) -> Self {
        let mut new = self.clone();
        new.set(feature, value);
        new
    }

    /// Adds every entry of `other` into this vector.
    pub fn add_all(&mut self, other: &FeatureVector) {
        for (&feature, &value) in other.iter() {
            self.add(feature, value);
        }
    }

    /// Dot product with a weight vector.
    #[must_use]
    pub fn dot(&self, weights: &FeatureVector) -> f64 {
        // Iterate the smaller side
        let (small, large) = if self.len() <= weights.len() {
            (self, weights)
        } else {
            (weights, self)
        };
        small.iter().map(|(&f, &v)| v * large.get(f)).sum()
    }

    /// Returns an iterator over the non-zero entries in feature order.
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureId, &f64)> {
        self.0.iter()
    }

    /// Renders the vector as `name=value` pairs.
    #[must_use]
    pub fn to_string_with(&self, vocab: &Vocab) -> String {
        self.iter()
            .map(|(&f, v)| format!("{}={v}", vocab.feature_name(f).unwrap_or("?")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(FeatureId, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (FeatureId, f64)>>(iter: I) -> Self {
        let mut v = Self::new();
        for (feature, value) in iter {
            v.add(feature, value);
        }
        v
    }
}

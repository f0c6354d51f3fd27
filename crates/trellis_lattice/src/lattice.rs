//! Lattice positions, arcs, and distances.

use trellis_foundation::{Error, Result, TerminalId, Vocab};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An outgoing lattice arc.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticeArc {
    /// The terminal on the arc.
    pub label: TerminalId,
    /// Cost of traversing the arc.
    pub cost: f64,
    /// Number of positions the arc spans (at least 1).
    pub span: usize,
}

impl LatticeArc {
    /// Creates a new arc.
    #[must_use]
    pub const fn new(label: TerminalId, cost: f64, span: usize) -> Self {
        Self { label, cost, span }
    }

    /// Creates a zero-cost arc to the next position.
    #[must_use]
    pub const fn word(label: TerminalId) -> Self {
        Self::new(label, 0.0, 1)
    }
}

/// A weighted directed acyclic word graph.
///
/// Position `i` owns the arcs leaving it; an arc with span `s` lands on
/// position `i + s`. The final position `len()` has no arcs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lattice {
    positions: Vec<Vec<LatticeArc>>,
    /// Shortest arc counts between positions, row-major over `len() + 1`.
    /// Only computed for non-linear lattices.
    distances: Option<Vec<usize>>,
}

impl Lattice {
    /// Creates a lattice from per-position arcs.
    ///
    /// # Errors
    ///
    /// Returns an error if an arc has span 0 or runs past the last position.
    pub fn new(positions: Vec<Vec<LatticeArc>>) -> Result<Self> {
        let len = positions.len();
        for (i, arcs) in positions.iter().enumerate() {
            for arc in arcs {
                if arc.span == 0 {
                    return Err(Error::invalid_arc(i, "span must be at least 1"));
                }
                // i < len, so this cannot overflow for huge spans
                if arc.span > len - i {
                    return Err(Error::invalid_arc(
                        i,
                        format!("span {} runs past final position {len}", arc.span),
                    ));
                }
            }
        }

        let mut lattice = Self {
            positions,
            distances: None,
        };
        if !lattice.is_linear() {
            lattice.distances = Some(lattice.compute_distances());
        }
        Ok(lattice)
    }

    /// Creates the linear lattice for a plain sentence.
    #[must_use]
    pub fn from_sentence(words: &[TerminalId]) -> Self {
        Self {
            positions: words.iter().map(|&w| vec![LatticeArc::word(w)]).collect(),
            distances: None,
        }
    }

    /// Interns whitespace-separated words and builds a sentence lattice.
    #[must_use]
    pub fn from_words(text: &str, vocab: &mut Vocab) -> Self {
        let words: Vec<_> = text
            .split_whitespace()
            .map(|w| vocab.intern_terminal(w))
            .collect();
        Self::from_sentence(&words)
    }

    /// Returns the number of positions that own arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the lattice has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the arcs leaving position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[must_use]
    pub fn arcs(&self, i: usize) -> &[LatticeArc] {
        &self.positions[i]
    }

    /// Returns all positions with their arcs.
    #[must_use]
    pub fn positions(&self) -> &[Vec<LatticeArc>] {
        &self.positions
    }

    /// Returns true if every position has at most one arc of span 1.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.positions
            .iter()
            .all(|arcs| arcs.len() <= 1 && arcs.iter().all(|a| a.span == 1))
    }

    /// Returns the words of a linear lattice.
    #[must_use]
    pub fn to_sentence(&self) -> Option<Vec<TerminalId>> {
        if !self.is_linear() {
            return None;
        }
        Some(
            self.positions
                .iter()
                .filter_map(|arcs| arcs.first().map(|a| a.label))
                .collect(),
        )
    }

    /// Returns the number of arcs on the shortest path from `from` to `to`.
    ///
    /// For linear lattices this is `to - from`. Unreachable pairs report
    /// `usize::MAX`.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> usize {
        match &self.distances {
            None => to.saturating_sub(from),
            Some(d) => {
                let n = self.positions.len() + 1;
                if from >= n || to >= n {
                    return usize::MAX;
                }
                d[from * n + to]
            }
        }
    }

    fn compute_distances(&self) -> Vec<usize> {
        let n = self.positions.len() + 1;
        let mut d = vec![usize::MAX; n * n];
        for i in 0..n {
            d[i * n + i] = 0;
        }
        for (i, arcs) in self.positions.iter().enumerate() {
            for arc in arcs {
                d[i * n + i + arc.span] = 1;
            }
        }
        // Floyd-Warshall; arcs only move forward so k can be limited to (i, j)
        for k in 0..n {
            for i in 0..k {
                let ik = d[i * n + k];
                if ik == usize::MAX {
                    continue;
                }
                for j in k + 1..n {
                    let kj = d[k * n + j];
                    if kj == usize::MAX {
                        continue;
                    }
                    let via = ik + kj;
                    if via < d[i * n + j] {
                        d[i * n + j] = via;
                    }
                }
            }
        }
        d
    }
}

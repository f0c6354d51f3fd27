//! Forest summaries used by tests and diagnostics.

use std::collections::BTreeMap;
use std::fmt;

use trellis_foundation::Vocab;

use crate::forest::{Forest, NodeId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Statistics
// =============================================================================

/// Size summary of a forest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForestStats {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of edges.
    pub edges: usize,
    /// Largest edge tail.
    pub max_arity: usize,
    /// Edge count per span width (`j - i`).
    pub edges_by_width: BTreeMap<usize, usize>,
}

impl ForestStats {
    /// Summarizes `forest`.
    #[must_use]
    pub fn of(forest: &Forest) -> Self {
        let mut stats = Self {
            nodes: forest.node_count(),
            edges: forest.edge_count(),
            ..Self::default()
        };
        for edge in forest.edges() {
            stats.max_arity = stats.max_arity.max(edge.arity());
            let width = edge.span.1.saturating_sub(edge.span.0);
            *stats.edges_by_width.entry(width).or_insert(0) += 1;
        }
        stats
    }
}

impl fmt::Display for ForestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} edges, max arity {}",
            self.nodes, self.edges, self.max_arity
        )
    }
}

// =============================================================================
// Edge Signatures
// =============================================================================

/// Id-independent description of an edge.
///
/// Two forests built from the same input are equivalent when their sorted
/// signature lists are equal, whatever order their nodes were created in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeSignature {
    /// Head category name, or `?` for an unconnected edge.
    pub head: String,
    /// Edge span.
    pub span: (usize, usize),
    /// The rule in `[X] ||| src ||| tgt` form.
    pub rule: String,
    /// Category name and span of each antecedent.
    pub tail: Vec<(String, (usize, usize))>,
}

impl fmt::Display for EdgeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?} <- {}", self.head, self.span, self.rule)?;
        for (cat, span) in &self.tail {
            write!(f, " {cat}{span:?}")?;
        }
        Ok(())
    }
}

/// Returns the sorted signatures of every edge in `forest`.
#[must_use]
pub fn edge_signatures(forest: &Forest, vocab: &Vocab) -> Vec<EdgeSignature> {
    let name = |id: NodeId| {
        let node = forest.node(id);
        vocab
            .category_name(node.category)
            .unwrap_or("?")
            .to_string()
    };

    let mut signatures: Vec<EdgeSignature> = forest
        .edges()
        .iter()
        .map(|edge| EdgeSignature {
            head: edge.head.map_or_else(|| "?".to_string(), name),
            span: edge.span,
            rule: edge.rule.display(vocab).to_string(),
            tail: edge
                .tail
                .iter()
                .map(|&t| (name(t), forest.node(t).span))
                .collect(),
        })
        .collect();
    signatures.sort();
    signatures
}

//! Parser configuration.

use std::collections::BTreeSet;

use trellis_debug::TracerConfig;
use trellis_foundation::{CategoryId, FeatureId, TerminalId};

/// Grammar name that is always subject to sentence constraints by default.
pub const DEFAULT_CONSTRAINED_GRAMMAR: &str = "ReorderableSyntacticConstrainedGrammar";

/// Configuration for [`crate::ExhaustiveParser`].
#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Category that must cover the whole lattice.
    pub goal: CategoryId,
    /// Category of the synthetic node above the goal.
    pub goal_node_category: CategoryId,
    /// Lattice label that advances a dotted item without a grammar step.
    pub epsilon: TerminalId,
    /// Grammars filtered by the constraint mask whenever one is present,
    /// in addition to the grammar named by the sentence metadata.
    pub constrained_grammars: BTreeSet<String>,
    /// Feature receiving the lattice path cost of each edge.
    pub lattice_cost_feature: Option<FeatureId>,
    /// Upper bound on edges reserved up front.
    pub max_reserved_edges: usize,
    /// Edges reserved per chart cell (`n * n` cells).
    pub edges_per_cell: usize,
    /// Tracing.
    pub trace: TracerConfig,
}

impl ParserConfig {
    /// Creates a configuration for parsing into `goal`.
    #[must_use]
    pub fn new(goal: CategoryId) -> Self {
        Self {
            goal,
            goal_node_category: CategoryId::GOAL,
            epsilon: TerminalId::EPSILON,
            constrained_grammars: BTreeSet::from([DEFAULT_CONSTRAINED_GRAMMAR.to_string()]),
            lattice_cost_feature: None,
            max_reserved_edges: 2_000_000,
            edges_per_cell: 1000,
            trace: TracerConfig::default(),
        }
    }

    /// Sets the synthetic goal node category.
    #[must_use]
    pub fn with_goal_node_category(mut self, category: CategoryId) -> Self {
        self.goal_node_category = category;
        self
    }

    /// Sets the epsilon label.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: TerminalId) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Adds a grammar name to the constrained set.
    #[must_use]
    pub fn with_constrained_grammar(mut self, name: impl Into<String>) -> Self {
        self.constrained_grammars.insert(name.into());
        self
    }

    /// Replaces the constrained set.
    #[must_use]
    pub fn with_constrained_grammars<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constrained_grammars = names.into_iter().map(Into::into).collect();
        self
    }

    /// Records lattice costs under `feature`.
    #[must_use]
    pub fn with_lattice_cost_feature(mut self, feature: FeatureId) -> Self {
        self.lattice_cost_feature = Some(feature);
        self
    }

    /// Sets the reservation hint.
    #[must_use]
    pub fn with_reservation(mut self, max_reserved_edges: usize, edges_per_cell: usize) -> Self {
        self.max_reserved_edges = max_reserved_edges;
        self.edges_per_cell = edges_per_cell;
        self
    }

    /// Sets the tracer configuration.
    #[must_use]
    pub fn with_trace(mut self, trace: TracerConfig) -> Self {
        self.trace = trace;
        self
    }

    /// Returns `(nodes, edges)` to reserve for a lattice of `n` positions.
    #[must_use]
    pub fn reservation(&self, n: usize) -> (usize, usize) {
        let cells = n.saturating_mul(n);
        (
            cells.saturating_mul(2),
            self.max_reserved_edges
                .min(cells.saturating_mul(self.edges_per_cell)),
        )
    }
}

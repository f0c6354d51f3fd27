//! The active chart: partially matched rules per span, for one grammar.

use std::fmt;

use im::Vector;
use trellis_forest::{Forest, NodeId};
use trellis_foundation::{Symbol, TerminalId};
use trellis_grammar::{Grammar, TrieNode};
use trellis_lattice::Lattice;

use crate::chart::SpanTable;
use crate::passive::PassiveChart;

// =============================================================================
// Dotted Item
// =============================================================================

/// A grammar trie position reached over some span, with the forest nodes
/// matched against its nonterminals so far.
#[derive(Clone)]
pub struct DottedItem<'g> {
    /// Position in the grammar's rule trie.
    pub node: &'g dyn TrieNode,
    /// Matched antecedents, in source order.
    pub antecedents: Vector<NodeId>,
    /// Sum of the costs of the lattice arcs crossed.
    pub lattice_cost: f64,
}

impl<'g> DottedItem<'g> {
    /// Creates an item at the trie root with nothing matched.
    #[must_use]
    pub fn root(node: &'g dyn TrieNode) -> Self {
        Self {
            node,
            antecedents: Vector::new(),
            lattice_cost: 0.0,
        }
    }

    fn extend_terminal(&self, label: TerminalId, cost: f64) -> Option<Self> {
        self.node
            .extend(Symbol::Terminal(label))
            .map(|node| Self {
                node,
                antecedents: self.antecedents.clone(),
                lattice_cost: self.lattice_cost + cost,
            })
    }

    fn skip_epsilon(&self, cost: f64) -> Self {
        Self {
            node: self.node,
            antecedents: self.antecedents.clone(),
            lattice_cost: self.lattice_cost + cost,
        }
    }

    fn extend_nonterminal(&self, forest: &Forest, id: NodeId) -> Option<Self> {
        let category = forest.node(id).category;
        self.node
            .extend(Symbol::NonTerminal(category))
            .map(|node| {
                let mut antecedents = self.antecedents.clone();
                antecedents.push_back(id);
                Self {
                    node,
                    antecedents,
                    lattice_cost: self.lattice_cost,
                }
            })
    }

    /// Returns true if some rule's source side ends at this item.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.node.rules().is_some()
    }
}

impl fmt::Debug for DottedItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DottedItem")
            .field("antecedents", &self.antecedents)
            .field("lattice_cost", &self.lattice_cost)
            .field("complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Active Chart
// =============================================================================

/// Dotted items of one grammar, indexed by the span matched so far.
#[derive(Debug)]
pub struct ActiveChart<'g> {
    cells: SpanTable<Vec<DottedItem<'g>>>,
}

impl<'g> ActiveChart<'g> {
    /// Creates a chart for `n` positions with the grammar's root item at
    /// every `(i, i)` where the grammar can start a rule.
    #[must_use]
    pub fn seeded(n: usize, grammar: &'g dyn Grammar) -> Self {
        let mut cells: SpanTable<Vec<DottedItem<'g>>> = SpanTable::new(n);
        for i in 0..=n {
            if grammar.has_rule_for_span(i, i, 0) {
                cells.get_mut(i, i).push(DottedItem::root(grammar.root()));
            }
        }
        Self { cells }
    }

    /// Returns the items matched over exactly `(i, j)`.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> &[DottedItem<'g>] {
        self.cells.get(i, j)
    }

    /// Extends every item over `(i, k)` by every node proved over `(k, j)`,
    /// adding the results to `(i, j)`.
    pub fn extend_nonterminal(
        &mut self,
        i: usize,
        k: usize,
        j: usize,
        passive: &PassiveChart,
        forest: &Forest,
    ) {
        let proved = passive.cell(k, j);
        if proved.is_empty() {
            return;
        }
        let mut extended = Vec::new();
        for item in self.cells.get(i, k) {
            for &id in proved {
                extended.extend(item.extend_nonterminal(forest, id));
            }
        }
        self.cells.get_mut(i, j).extend(extended);
    }

    /// Builds the items for `(i, j)`: first by combining every split
    /// `(i, k) + (k, j)`, then by crossing each arc that leaves position
    /// `j - 1` from the items over `(i, j - 1)`.
    ///
    /// An arc of length `len` lands on `(i, j - 1 + len)`. Arcs labelled
    /// `epsilon` keep the trie position and only add their cost.
    pub fn advance_dots(
        &mut self,
        i: usize,
        j: usize,
        lattice: &Lattice,
        passive: &PassiveChart,
        forest: &Forest,
        epsilon: TerminalId,
    ) {
        for k in i + 1..j {
            self.extend_nonterminal(i, k, j, passive, forest);
        }

        let from = j - 1;
        for arc in lattice.arcs(from) {
            let items = self.cells.get(i, from);
            let advanced: Vec<DottedItem<'g>> = if arc.label == epsilon {
                items.iter().map(|item| item.skip_epsilon(arc.cost)).collect()
            } else {
                items
                    .iter()
                    .filter_map(|item| item.extend_terminal(arc.label, arc.cost))
                    .collect()
            };
            self.cells.get_mut(i, from + arc.span).extend(advanced);
        }
    }
}

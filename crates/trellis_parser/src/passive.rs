//! The passive chart: proved categories per span.

use std::collections::HashMap;

use trellis_forest::{Forest, NodeId};
use trellis_foundation::{CategoryId, Error, FeatureId, Result};
use trellis_grammar::RulePtr;

use crate::chart::SpanTable;

/// Forest nodes proved over each span, one per category.
///
/// The synthetic goal node is tracked separately and never listed in a
/// cell, so grammars cannot extend items with it.
#[derive(Debug)]
pub struct PassiveChart {
    nodes: SpanTable<Vec<NodeId>>,
    by_category: SpanTable<HashMap<CategoryId, NodeId>>,
    goal: Option<NodeId>,
    goal_node_category: CategoryId,
    lattice_cost_feature: Option<FeatureId>,
}

impl PassiveChart {
    /// Creates an empty chart for a lattice of `n` positions.
    #[must_use]
    pub fn new(
        n: usize,
        goal_node_category: CategoryId,
        lattice_cost_feature: Option<FeatureId>,
    ) -> Self {
        Self {
            nodes: SpanTable::new(n),
            by_category: SpanTable::new(n),
            goal: None,
            goal_node_category,
            lattice_cost_feature,
        }
    }

    /// Returns the nodes proved over `(i, j)` in the order they were created.
    #[must_use]
    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> &[NodeId] {
        self.nodes.get(i, j)
    }

    /// Returns the node for `category` over `(i, j)`, if proved.
    #[must_use]
    pub fn node_for(&self, i: usize, j: usize, category: CategoryId) -> Option<NodeId> {
        self.by_category.get(i, j).get(&category).copied()
    }

    /// Returns the goal node, once created.
    #[must_use]
    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    /// Adds an edge applying `rule` to `tail` over `(i, j)` and connects it
    /// to the node for the rule's category, creating that node if needed.
    ///
    /// `lattice_cost` is recorded when it is non-zero and a lattice cost
    /// feature is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the tail does not match the rule's arity, or if
    /// a second goal node would be created.
    pub fn apply_rule(
        &mut self,
        forest: &mut Forest,
        i: usize,
        j: usize,
        rule: &RulePtr,
        tail: Vec<NodeId>,
        lattice_cost: f64,
    ) -> Result<NodeId> {
        let edge = forest.add_edge(RulePtr::clone(rule), tail)?;
        {
            let edge = forest.edge_mut(edge);
            edge.span = (i, j);
            if lattice_cost != 0.0 {
                if let Some(feature) = self.lattice_cost_feature {
                    edge.features.set(feature, lattice_cost);
                }
            }
        }

        let category = rule.lhs();
        let head = match self.by_category.get(i, j).get(&category) {
            Some(&node) => node,
            None => {
                let is_goal = category == self.goal_node_category;
                if is_goal {
                    if let Some(existing) = self.goal {
                        return Err(Error::duplicate_goal(existing.index()));
                    }
                }
                let node = forest.add_node(category, (i, j));
                self.by_category.get_mut(i, j).insert(category, node);
                if is_goal {
                    self.goal = Some(node);
                } else {
                    self.nodes.get_mut(i, j).push(node);
                }
                node
            }
        };
        forest.connect(edge, head);
        Ok(head)
    }
}

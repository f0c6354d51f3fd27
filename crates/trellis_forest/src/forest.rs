//! The forest hypergraph.
//!
//! Nodes are categories proved over a span; edges are rule applications
//! whose tail lists the antecedent nodes in source order. The parser only
//! appends; [`Forest::prune_unreachable`] compacts the result once a goal
//! node is known.

use std::fmt;

use trellis_foundation::{CategoryId, Error, ErrorKind, FeatureVector, Result};
use trellis_grammar::RulePtr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// Index of a node in a [`Forest`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Index of an edge in a [`Forest`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

// =============================================================================
// Node and Edge
// =============================================================================

/// A category proved over a span, with its alternative derivations.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// This node's id.
    pub id: NodeId,
    /// The proved category.
    pub category: CategoryId,
    /// Lattice span `(i, j)`.
    pub span: (usize, usize),
    /// Edges deriving this node.
    pub in_edges: Vec<EdgeId>,
    /// Edges using this node as an antecedent.
    pub out_edges: Vec<EdgeId>,
}

/// One application of a rule.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// This edge's id.
    pub id: EdgeId,
    /// The applied rule.
    pub rule: RulePtr,
    /// The derived node, once connected.
    pub head: Option<NodeId>,
    /// Antecedent nodes, one per source nonterminal of the rule.
    pub tail: Vec<NodeId>,
    /// Lattice span `(i, j)`.
    pub span: (usize, usize),
    /// Feature values (rule features plus lattice cost).
    pub features: FeatureVector,
}

impl Edge {
    /// Returns the number of antecedents.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.tail.len()
    }
}

// =============================================================================
// Forest
// =============================================================================

/// Append-only derivation hypergraph.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Forest {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    goal: Option<NodeId>,
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves room for additional nodes and edges.
    pub fn reserve(&mut self, nodes: usize, edges: usize) {
        self.nodes.reserve(nodes);
        self.edges.reserve(edges);
    }

    /// Adds a node for `category` over `span`.
    pub fn add_node(&mut self, category: CategoryId, span: (usize, usize)) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            category,
            span,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        });
        id
    }

    /// Adds an unconnected edge applying `rule` to `tail`.
    ///
    /// The edge starts with the rule's features and an empty span; set
    /// those through [`Forest::edge_mut`] before connecting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the tail size differs from the rule's arity or a
    /// tail node does not exist.
    pub fn add_edge(&mut self, rule: RulePtr, tail: Vec<NodeId>) -> Result<EdgeId> {
        if tail.len() != rule.arity() {
            return Err(Error::arity_mismatch(rule.arity(), tail.len()));
        }
        if let Some(missing) = tail.iter().find(|n| n.0 >= self.nodes.len()) {
            return Err(Error::new(ErrorKind::UnknownNode(missing.0)));
        }

        let id = EdgeId(self.edges.len());
        for &t in &tail {
            // Listed once even when the node fills several slots
            let out = &mut self.nodes[t.0].out_edges;
            if out.last() != Some(&id) {
                out.push(id);
            }
        }
        self.edges.push(Edge {
            id,
            features: rule.features().clone(),
            rule,
            head: None,
            tail,
            span: (0, 0),
        });
        Ok(id)
    }

    /// Makes `node` the head of `edge`.
    ///
    /// # Panics
    ///
    /// Panics if either id is not from this forest.
    pub fn connect(&mut self, edge: EdgeId, node: NodeId) {
        debug_assert!(self.edges[edge.0].head.is_none(), "edge connected twice");
        self.edges[edge.0].head = Some(node);
        self.nodes[node.0].in_edges.push(edge);
    }

    /// Returns a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not from this forest.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns an edge.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not from this forest.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Returns an edge for updating its span and features.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not from this forest.
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    /// Returns all nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns all edges.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the forest has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the goal node, if one has been designated.
    #[must_use]
    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    /// Designates the goal node.
    pub fn set_goal(&mut self, goal: NodeId) {
        self.goal = Some(goal);
    }

    /// Removes every node and edge not reachable from `goal` by following
    /// in-edges to their tails. Survivors keep their relative order and are
    /// renumbered densely.
    ///
    /// Returns the goal's new id, which also becomes [`Forest::goal`].
    ///
    /// # Errors
    ///
    /// Returns an error if `goal` is not a node of this forest.
    pub fn prune_unreachable(&mut self, goal: NodeId) -> Result<NodeId> {
        if goal.0 >= self.nodes.len() {
            return Err(Error::new(ErrorKind::UnknownNode(goal.0)));
        }

        let mut reachable = vec![false; self.nodes.len()];
        let mut stack = vec![goal];
        reachable[goal.0] = true;
        while let Some(n) = stack.pop() {
            for &e in &self.nodes[n.0].in_edges {
                for &t in &self.edges[e.0].tail {
                    if !reachable[t.0] {
                        reachable[t.0] = true;
                        stack.push(t);
                    }
                }
            }
        }

        let keep_edge: Vec<bool> = self
            .edges
            .iter()
            .map(|e| e.head.is_some_and(|h| reachable[h.0]))
            .collect();

        let node_map = renumber(&reachable);
        let edge_map = renumber(&keep_edge);
        let remap_node = |n: NodeId| NodeId(node_map[n.0]);
        let remap_edges = |es: &[EdgeId]| -> Vec<EdgeId> {
            es.iter()
                .filter(|e| keep_edge[e.0])
                .map(|e| EdgeId(edge_map[e.0]))
                .collect()
        };

        let nodes = std::mem::take(&mut self.nodes)
            .into_iter()
            .filter(|n| reachable[n.id.0])
            .map(|n| Node {
                id: remap_node(n.id),
                in_edges: remap_edges(&n.in_edges),
                out_edges: remap_edges(&n.out_edges),
                ..n
            })
            .collect();

        let edges = std::mem::take(&mut self.edges)
            .into_iter()
            .filter(|e| keep_edge[e.id.0])
            .map(|e| Edge {
                id: EdgeId(edge_map[e.id.0]),
                head: e.head.map(remap_node),
                tail: e.tail.iter().copied().map(remap_node).collect(),
                ..e
            })
            .collect();

        self.nodes = nodes;
        self.edges = edges;
        let goal = remap_node(goal);
        self.goal = Some(goal);
        Ok(goal)
    }

    /// Returns the nodes in bottom-up order: each node comes after the tail
    /// of at least one of its in-edges. Returns `None` if some node can only
    /// be derived through a cycle.
    #[must_use]
    pub fn topological_order(&self) -> Option<Vec<NodeId>> {
        // Kahn's algorithm; an edge fires once all of its tail nodes are out
        let mut pending: Vec<usize> = self.edges.iter().map(|e| e.tail.len()).collect();
        let mut queue: Vec<NodeId> = Vec::new();
        let mut order = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let has_axiom = node
                .in_edges
                .iter()
                .any(|e| self.edges[e.0].tail.is_empty());
            if has_axiom || node.in_edges.is_empty() {
                queue.push(node.id);
            }
        }

        let mut done = vec![false; self.nodes.len()];
        while let Some(n) = queue.pop() {
            if done[n.0] {
                continue;
            }
            done[n.0] = true;
            order.push(n);
            for &e in &self.nodes[n.0].out_edges {
                // A node may appear more than once in a tail
                let uses = self.edges[e.0].tail.iter().filter(|&&t| t == n).count();
                pending[e.0] -= uses;
                if pending[e.0] == 0 {
                    if let Some(h) = self.edges[e.0].head.filter(|h| !done[h.0]) {
                        queue.push(h);
                    }
                }
            }
        }

        (order.len() == self.nodes.len()).then_some(order)
    }
}

/// Maps each kept index to its position among kept indices. Dropped
/// indices map to `usize::MAX` and must not be looked up.
fn renumber(keep: &[bool]) -> Vec<usize> {
    let mut next = 0;
    keep.iter()
        .map(|&k| {
            if k {
                next += 1;
                next - 1
            } else {
                usize::MAX
            }
        })
        .collect()
}

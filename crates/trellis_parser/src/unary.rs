//! Ordering of unary rules for single-pass closure.
//!
//! Unary rules form a graph from right-hand-side category to left-hand-side
//! category. A depth-first walk over that graph yields an order in which
//! each rule runs before the rules that consume its output. Rules that would
//! close a cycle are dropped, so closure always terminates.

use std::collections::HashMap;

use trellis_foundation::CategoryId;
use trellis_grammar::{GrammarPtr, RulePtr};

/// A unary rule together with the grammar it came from.
#[derive(Clone, Debug)]
pub struct UnaryRule {
    /// Index into the parser's grammar list.
    pub grammar: usize,
    /// The rule.
    pub rule: RulePtr,
}

impl UnaryRule {
    fn rhs(&self) -> CategoryId {
        // Grammars only report rules with one nonterminal here
        self.rule.unary_rhs().unwrap_or(CategoryId::GOAL)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Unary rules of every grammar, in closure order.
#[derive(Clone, Debug, Default)]
pub struct UnaryClosure {
    sorted: Vec<UnaryRule>,
    by_rhs: HashMap<CategoryId, Vec<usize>>,
    dropped: Vec<UnaryRule>,
}

impl UnaryClosure {
    /// Sorts the unary rules of `grammars`.
    ///
    /// The walk starts from `goal`, so a rule that would turn a category
    /// derived from the goal back into the goal is the one dropped. Rules
    /// sharing a right-hand side keep their grammar order and insertion
    /// order.
    #[must_use]
    pub fn build(grammars: &[GrammarPtr], goal: CategoryId) -> Self {
        let rules: Vec<UnaryRule> = grammars
            .iter()
            .enumerate()
            .flat_map(|(gi, g)| {
                g.unary_rules().iter().map(move |r| UnaryRule {
                    grammar: gi,
                    rule: RulePtr::clone(r),
                })
            })
            .filter(|u| u.rule.is_unary())
            .collect();

        // Outgoing rules per category, and categories in first-seen order
        let mut graph: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        let mut roots: Vec<CategoryId> = Vec::new();
        for (idx, u) in rules.iter().enumerate() {
            let rhs = u.rhs();
            graph
                .entry(rhs)
                .or_insert_with(|| {
                    roots.push(rhs);
                    Vec::new()
                })
                .push(idx);
        }

        let mut sorter = Sorter {
            rules: &rules,
            graph: &graph,
            marks: HashMap::new(),
            order: Vec::with_capacity(rules.len()),
            dropped: Vec::new(),
        };
        for root in std::iter::once(goal).chain(roots) {
            if !sorter.marks.contains_key(&root) {
                sorter.visit(root);
            }
        }
        let Sorter {
            mut order, dropped, ..
        } = sorter;
        order.reverse();

        let sorted: Vec<UnaryRule> = order.into_iter().map(|idx| rules[idx].clone()).collect();
        let mut by_rhs: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        for (idx, u) in sorted.iter().enumerate() {
            by_rhs.entry(u.rhs()).or_default().push(idx);
        }

        Self {
            sorted,
            by_rhs,
            dropped: dropped.into_iter().map(|idx| rules[idx].clone()).collect(),
        }
    }

    /// Returns the rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[UnaryRule] {
        &self.sorted
    }

    /// Returns the rules that consume `category`, in application order.
    pub fn rules_for_rhs(&self, category: CategoryId) -> impl Iterator<Item = &UnaryRule> {
        self.by_rhs
            .get(&category)
            .into_iter()
            .flatten()
            .map(|&idx| &self.sorted[idx])
    }

    /// Returns the rules left out to break cycles.
    #[must_use]
    pub fn dropped(&self) -> &[UnaryRule] {
        &self.dropped
    }

    /// Returns the number of rules that will be applied.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Returns true if no unary rule will be applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

struct Sorter<'a> {
    rules: &'a [UnaryRule],
    graph: &'a HashMap<CategoryId, Vec<usize>>,
    marks: HashMap<CategoryId, Mark>,
    order: Vec<usize>,
    dropped: Vec<usize>,
}

impl Sorter<'_> {
    fn visit(&mut self, category: CategoryId) {
        self.marks.insert(category, Mark::InProgress);

        let mut kept = Vec::new();
        if let Some(out) = self.graph.get(&category) {
            for &idx in out {
                let lhs = self.rules[idx].rule.lhs();
                match self.marks.get(&lhs) {
                    Some(Mark::InProgress) => self.dropped.push(idx),
                    Some(Mark::Done) => kept.push(idx),
                    None => {
                        self.visit(lhs);
                        kept.push(idx);
                    }
                }
            }
        }

        self.marks.insert(category, Mark::Done);
        // Reversed here so the final reversal restores insertion order
        self.order.extend(kept.into_iter().rev());
    }
}

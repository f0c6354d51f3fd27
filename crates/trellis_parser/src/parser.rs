//! The exhaustive bottom-up parser.

use std::fmt;
use std::sync::Arc;

use trellis_debug::{ParseEvent, Tracer};
use trellis_forest::{Forest, NodeId};
use trellis_foundation::{ErrorContext, Result};
use trellis_grammar::{GrammarPtr, Rule, RulePtr};
use trellis_lattice::Lattice;

use crate::active::ActiveChart;
use crate::config::ParserConfig;
use crate::constraint::ConstraintMask;
use crate::metadata::SentenceMetadata;
use crate::passive::PassiveChart;
use crate::unary::UnaryClosure;

/// Parses lattices with a fixed set of grammars, building every derivation
/// of the goal category into a [`Forest`].
///
/// Spans are visited by increasing width. For each span every grammar first
/// advances its active chart and applies the rules it completes, then the
/// unary closure runs, then grammars pick up the newly proved nodes.
pub struct ExhaustiveParser {
    config: ParserConfig,
    grammars: Vec<GrammarPtr>,
    unary: UnaryClosure,
    tracer: Tracer,
    parsed: u64,
}

impl ExhaustiveParser {
    /// Creates a parser and orders the grammars' unary rules.
    ///
    /// Unary rules dropped to break cycles are reported to the tracer.
    #[must_use]
    pub fn new(config: ParserConfig, grammars: Vec<GrammarPtr>) -> Self {
        let unary = UnaryClosure::build(&grammars, config.goal);
        let mut tracer = Tracer::new(config.trace.clone());
        for dropped in unary.dropped() {
            if let Some(rhs) = dropped.rule.unary_rhs() {
                tracer.unary_cycle_dropped(
                    grammars[dropped.grammar].name(),
                    dropped.rule.lhs(),
                    rhs,
                );
            }
        }
        Self {
            config,
            grammars,
            unary,
            tracer,
            parsed: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the grammars.
    #[must_use]
    pub fn grammars(&self) -> &[GrammarPtr] {
        &self.grammars
    }

    /// Returns the unary rule order.
    #[must_use]
    pub fn unary_closure(&self) -> &UnaryClosure {
        &self.unary
    }

    /// Returns the tracer.
    #[must_use]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the tracer mutably.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Parses `lattice` into `forest`, which should be empty.
    ///
    /// Returns `Ok(true)` if the goal category covers the whole lattice; the
    /// forest is then pruned to what the goal node reaches and its goal is
    /// set. Returns `Ok(false)` otherwise and leaves the forest unpruned.
    ///
    /// When `metadata` carries a constraint string, a [`ConstraintMask`]
    /// over its source length filters completed rules of the grammar it
    /// names and of every grammar in [`ParserConfig::constrained_grammars`].
    ///
    /// # Errors
    ///
    /// Returns an error if the constraint string is malformed or does not
    /// match the source length, if a constraint query falls outside the
    /// mask, if a rule's arity does not match its matched antecedents, or
    /// if a second goal node would be created.
    pub fn parse(
        &mut self,
        lattice: &Lattice,
        metadata: Option<&SentenceMetadata>,
        forest: &mut Forest,
    ) -> Result<bool> {
        let sentence = metadata.map_or(self.parsed, SentenceMetadata::id);
        self.parsed += 1;
        self.tracer
            .parse_start(sentence, lattice.len(), self.grammars.len());

        let found = self.run(lattice, metadata, forest).map_err(|e| {
            let context = e
                .context
                .clone()
                .unwrap_or_default()
                .with_source(format!("sentence {sentence}"))
                .with_frame("bottom-up parse");
            e.with_context(context)
        })?;

        self.tracer.parse_end(found);
        Ok(found)
    }

    fn run(
        &mut self,
        lattice: &Lattice,
        metadata: Option<&SentenceMetadata>,
        forest: &mut Forest,
    ) -> Result<bool> {
        let Self {
            config,
            grammars,
            unary,
            tracer,
            ..
        } = self;
        let n = lattice.len();

        let (nodes, edges) = config.reservation(n);
        forest.reserve(nodes, edges);

        let mask = match metadata.and_then(|m| m.constraints().map(|spec| (m, spec))) {
            Some((meta, spec)) => {
                let mask = ConstraintMask::build(spec, meta.source_length())?;
                tracer.record(ParseEvent::ConstraintsActive {
                    spec: spec.to_string(),
                });
                Some(mask)
            }
            None => None,
        };
        let targeted = metadata.and_then(SentenceMetadata::grammar);
        let constrained: Vec<bool> = grammars
            .iter()
            .map(|g| config.constrained_grammars.contains(g.name()) || targeted == Some(g.name()))
            .collect();

        let mut passive = PassiveChart::new(n, config.goal_node_category, config.lattice_cost_feature);
        let mut actives: Vec<ActiveChart<'_>> = grammars
            .iter()
            .map(|g| ActiveChart::seeded(n, g.as_ref()))
            .collect();
        let goal_rule: RulePtr = Arc::new(Rule::goal(config.goal_node_category, config.goal));
        let mut covers = vec![false; grammars.len()];

        for width in 1..=n {
            for i in 0..=n - width {
                let j = i + width;
                let distance = lattice.distance(i, j);
                for (cover, g) in covers.iter_mut().zip(grammars.iter()) {
                    *cover = g.has_rule_for_span(i, j, distance);
                }

                for (gi, active) in actives.iter_mut().enumerate() {
                    if !covers[gi] {
                        continue;
                    }
                    active.advance_dots(i, j, lattice, &passive, forest, config.epsilon);

                    for item in active.cell(i, j) {
                        let Some(rules) = item.node.rules() else {
                            continue;
                        };
                        if let Some(mask) = &mask {
                            if constrained[gi] && !mask.allowed(i, j - 1)? {
                                continue;
                            }
                        }
                        let tail: Vec<NodeId> = item.antecedents.iter().copied().collect();
                        for rule in rules {
                            passive
                                .apply_rule(forest, i, j, rule, tail.clone(), item.lattice_cost)
                                .map_err(|e| e.with_context(ErrorContext::new().with_span(i, j)))?;
                        }
                    }
                }

                apply_unary_closure(unary, &covers, &mut passive, forest, i, j)?;

                for (gi, active) in actives.iter_mut().enumerate() {
                    if covers[gi] {
                        active.extend_nonterminal(i, i, j, &passive, forest);
                    }
                }
            }

            let top: Vec<NodeId> = passive
                .cell(0, n)
                .iter()
                .copied()
                .filter(|&id| forest.node(id).category == config.goal)
                .collect();
            for id in top {
                passive.apply_rule(forest, 0, n, &goal_rule, vec![id], 0.0)?;
            }
            tracer.width_complete(width, forest.node_count(), forest.edge_count());
            if width == n && passive.goal().is_some() {
                tracer.record(ParseEvent::GoalFound { width });
            }
        }

        match passive.goal() {
            Some(goal) => {
                let (nodes_before, edges_before) = (forest.node_count(), forest.edge_count());
                forest.prune_unreachable(goal)?;
                tracer.record(ParseEvent::ForestPruned {
                    nodes_before,
                    nodes_after: forest.node_count(),
                    edges_before,
                    edges_after: forest.edge_count(),
                });
                Ok(true)
            }
            None => {
                tracer.record(ParseEvent::ParseFailed { positions: n });
                Ok(false)
            }
        }
    }
}

impl fmt::Debug for ExhaustiveParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.grammars.iter().map(|g| g.name()).collect();
        f.debug_struct("ExhaustiveParser")
            .field("config", &self.config)
            .field("grammars", &names)
            .field("unary_rules", &self.unary.len())
            .field("parsed", &self.parsed)
            .finish_non_exhaustive()
    }
}

/// Applies every ordered unary rule of a grammar covering `(i, j)` to every
/// node proved over `(i, j)`, including nodes this closure creates.
fn apply_unary_closure(
    unary: &UnaryClosure,
    covers: &[bool],
    passive: &mut PassiveChart,
    forest: &mut Forest,
    i: usize,
    j: usize,
) -> Result<()> {
    if unary.is_empty() {
        return Ok(());
    }
    // The cell grows while we walk it
    let mut next = 0;
    while let Some(&id) = passive.cell(i, j).get(next) {
        next += 1;
        let category = forest.node(id).category;
        for u in unary.rules_for_rhs(category) {
            if covers[u.grammar] {
                passive.apply_rule(forest, i, j, &u.rule, vec![id], 0.0)?;
            }
        }
    }
    Ok(())
}

//! Synchronous grammar rules.

use std::fmt;
use std::sync::Arc;

use trellis_foundation::{CategoryId, Error, ErrorKind, FeatureVector, Result, Symbol, TerminalId, Vocab};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shared handle to a rule. Forest edges and tries all point at the same rule.
pub type RulePtr = Arc<Rule>;

// =============================================================================
// Target Side
// =============================================================================

/// An item on the target side of a synchronous rule.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TargetItem {
    /// An output word.
    Terminal(TerminalId),
    /// The translation of the n-th (0-based) source nonterminal.
    Gap(usize),
}

// =============================================================================
// Rule
// =============================================================================

/// A weighted synchronous rule `[X] ||| source ||| target`.
///
/// The parser only reads the source side; the target side and features
/// travel with forest edges for downstream rescoring.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    lhs: CategoryId,
    source: Vec<Symbol>,
    target: Vec<TargetItem>,
    features: FeatureVector,
    arity: usize,
}

impl Rule {
    /// Creates a monolingual rule whose target side copies the source side.
    #[must_use]
    pub fn new(lhs: CategoryId, source: Vec<Symbol>, features: FeatureVector) -> Self {
        let mut gap = 0;
        let target = source
            .iter()
            .map(|s| match *s {
                Symbol::Terminal(t) => TargetItem::Terminal(t),
                Symbol::NonTerminal(_) => {
                    gap += 1;
                    TargetItem::Gap(gap - 1)
                }
            })
            .collect();
        Self {
            lhs,
            arity: gap,
            source,
            target,
            features,
        }
    }

    /// Creates a synchronous rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the source side is empty, or if a target gap
    /// refers to a missing source nonterminal or is used twice.
    pub fn synchronous(
        lhs: CategoryId,
        source: Vec<Symbol>,
        target: Vec<TargetItem>,
        features: FeatureVector,
    ) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::new(ErrorKind::InvalidRule(
                "empty source side".to_string(),
            )));
        }
        let arity = source.iter().filter(|s| s.is_nonterminal()).count();
        let mut seen = vec![false; arity];
        for item in &target {
            if let TargetItem::Gap(n) = *item {
                if n >= arity {
                    return Err(Error::new(ErrorKind::InvalidRule(format!(
                        "target gap {} but only {arity} source nonterminals",
                        n + 1
                    ))));
                }
                if seen[n] {
                    return Err(Error::new(ErrorKind::InvalidRule(format!(
                        "target gap {} used twice",
                        n + 1
                    ))));
                }
                seen[n] = true;
            }
        }
        Ok(Self {
            lhs,
            source,
            target,
            features,
            arity,
        })
    }

    /// Creates the synthetic goal rule `[Goal] ||| [goal,1] ||| [goal,1]`.
    #[must_use]
    pub fn goal(goal_node_category: CategoryId, goal: CategoryId) -> Self {
        Self::new(
            goal_node_category,
            vec![Symbol::NonTerminal(goal)],
            FeatureVector::new(),
        )
    }

    /// Returns the left-hand-side category.
    #[must_use]
    pub fn lhs(&self) -> CategoryId {
        self.lhs
    }

    /// Returns the source side.
    #[must_use]
    pub fn source(&self) -> &[Symbol] {
        &self.source
    }

    /// Returns the target side.
    #[must_use]
    pub fn target(&self) -> &[TargetItem] {
        &self.target
    }

    /// Returns the static features.
    #[must_use]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// Returns the number of source nonterminals.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns true if the source side is exactly one nonterminal.
    #[must_use]
    pub fn is_unary(&self) -> bool {
        self.source.len() == 1 && self.source[0].is_nonterminal()
    }

    /// Returns the single right-hand-side category of a unary rule.
    #[must_use]
    pub fn unary_rhs(&self) -> Option<CategoryId> {
        if self.is_unary() {
            self.source[0].category()
        } else {
            None
        }
    }

    /// Returns a displayable view resolving names through `vocab`.
    #[must_use]
    pub fn display<'a>(&'a self, vocab: &'a Vocab) -> RuleDisplay<'a> {
        RuleDisplay { rule: self, vocab }
    }
}

/// Display adapter for a [`Rule`] in `[X] ||| [Y,1] a ||| a [Y,1]` form.
pub struct RuleDisplay<'a> {
    rule: &'a Rule,
    vocab: &'a Vocab,
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cat = |c: CategoryId| self.vocab.category_name(c).unwrap_or("?");
        write!(f, "[{}] |||", cat(self.rule.lhs))?;

        let mut slots = Vec::with_capacity(self.rule.arity);
        for symbol in &self.rule.source {
            match *symbol {
                Symbol::Terminal(t) => {
                    write!(f, " {}", self.vocab.terminal_name(t).unwrap_or("?"))?;
                }
                Symbol::NonTerminal(c) => {
                    slots.push(c);
                    write!(f, " [{},{}]", cat(c), slots.len())?;
                }
            }
        }

        write!(f, " |||")?;
        for item in &self.rule.target {
            match *item {
                TargetItem::Terminal(t) => {
                    write!(f, " {}", self.vocab.terminal_name(t).unwrap_or("?"))?;
                }
                TargetItem::Gap(n) => {
                    let c = slots.get(n).map_or("?", |&c| cat(c));
                    write!(f, " [{c},{}]", n + 1)?;
                }
            }
        }

        if !self.rule.features.is_empty() {
            write!(f, " ||| {}", self.rule.features.to_string_with(self.vocab))?;
        }
        Ok(())
    }
}

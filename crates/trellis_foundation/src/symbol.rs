//! Source-side grammar symbols.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intern::{CategoryId, TerminalId, Vocab};

/// A symbol on the source side of a rule: a word or a nonterminal slot.
///
/// Rule tries are walked one `Symbol` at a time, whether the parser is
/// crossing a lattice arc or consuming a proved forest node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Symbol {
    /// A lattice terminal.
    Terminal(TerminalId),
    /// A nonterminal category.
    NonTerminal(CategoryId),
}

impl Symbol {
    /// Returns true if this is a nonterminal.
    #[must_use]
    pub const fn is_nonterminal(self) -> bool {
        matches!(self, Self::NonTerminal(_))
    }

    /// Returns the category if this is a nonterminal.
    #[must_use]
    pub const fn category(self) -> Option<CategoryId> {
        match self {
            Self::NonTerminal(c) => Some(c),
            Self::Terminal(_) => None,
        }
    }

    /// Returns the terminal if this is a word.
    #[must_use]
    pub const fn terminal(self) -> Option<TerminalId> {
        match self {
            Self::Terminal(t) => Some(t),
            Self::NonTerminal(_) => None,
        }
    }

    /// Returns a displayable view resolving names through `vocab`.
    #[must_use]
    pub fn display(self, vocab: &Vocab) -> SymbolDisplay<'_> {
        SymbolDisplay {
            symbol: self,
            vocab,
        }
    }
}

impl From<TerminalId> for Symbol {
    fn from(t: TerminalId) -> Self {
        Self::Terminal(t)
    }
}

impl From<CategoryId> for Symbol {
    fn from(c: CategoryId) -> Self {
        Self::NonTerminal(c)
    }
}

/// Display adapter for a [`Symbol`]; categories print as `[X]`.
pub struct SymbolDisplay<'a> {
    symbol: Symbol,
    vocab: &'a Vocab,
}

impl fmt::Display for SymbolDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Symbol::Terminal(t) => write!(f, "{}", self.vocab.terminal_name(t).unwrap_or("?")),
            Symbol::NonTerminal(c) => {
                write!(f, "[{}]", self.vocab.category_name(c).unwrap_or("?"))
            }
        }
    }
}

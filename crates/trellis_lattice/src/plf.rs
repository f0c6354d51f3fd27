//! The PLF ("Python lattice format") text representation.
//!
//! A lattice is a tuple of positions, each a tuple of arcs, each arc a
//! `('word', cost, span)` triple. Trailing commas are allowed everywhere:
//!
//! ```text
//! ((('das',0,1),('die',-0.5,1),),(('haus',0,1),),)
//! ```

use std::fmt::Write;

use trellis_foundation::{Error, ErrorKind, Result, Vocab};

use crate::lattice::{Lattice, LatticeArc};

/// Returns true if `text` should be read as PLF rather than a plain sentence.
#[must_use]
pub fn looks_like_plf(text: &str) -> bool {
    let t = text.trim_start();
    t.starts_with("((('") || t.starts_with("((\"") || t.trim_end() == "()"
}

/// Reads `text` as PLF if it looks like PLF, otherwise as a whitespace-separated sentence.
///
/// # Errors
///
/// Returns an error if PLF input is malformed.
pub fn from_text_or_plf(text: &str, vocab: &mut Vocab) -> Result<Lattice> {
    if looks_like_plf(text) {
        parse_plf(text, vocab)
    } else {
        Ok(Lattice::from_words(text, vocab))
    }
}

/// Parses PLF text into a lattice, interning words into `vocab`.
///
/// # Errors
///
/// Returns an error on malformed input or invalid arcs.
pub fn parse_plf(text: &str, vocab: &mut Vocab) -> Result<Lattice> {
    let mut reader = PlfReader {
        input: text,
        pos: 0,
        vocab,
    };
    let positions = reader.lattice()?;
    reader.skip_ws();
    if reader.pos != reader.input.len() {
        return Err(reader.error("trailing input after lattice"));
    }
    Lattice::new(positions)
}

/// Writes a lattice in PLF.
#[must_use]
pub fn to_plf(lattice: &Lattice, vocab: &Vocab) -> String {
    let mut out = String::from("(");
    for arcs in lattice.positions() {
        out.push('(');
        for arc in arcs {
            let word = vocab.terminal_name(arc.label).unwrap_or("?");
            let escaped = word.replace('\\', "\\\\").replace('\'', "\\'");
            let _ = write!(out, "('{escaped}',{},{}),", arc.cost, arc.span);
        }
        out.push_str("),");
    }
    out.push(')');
    out
}

struct PlfReader<'a, 'v> {
    input: &'a str,
    pos: usize,
    vocab: &'v mut Vocab,
}

impl PlfReader<'_, '_> {
    fn error(&self, message: impl Into<String>) -> Error {
        Error::new(ErrorKind::PlfSyntax {
            offset: self.pos,
            message: message.into(),
        })
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char) -> Result<()> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(self.error(format!("expected `{want}`, found `{c}`"))),
            None => Err(self.error(format!("expected `{want}`, found end of input"))),
        }
    }

    /// Consumes an optional comma; returns true if the tuple closes next.
    fn separator(&mut self) -> bool {
        self.skip_ws();
        if self.peek() == Some(',') {
            self.bump();
            self.skip_ws();
        }
        self.peek() == Some(')')
    }

    fn lattice(&mut self) -> Result<Vec<Vec<LatticeArc>>> {
        self.expect('(')?;
        let mut positions = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(')') {
                self.bump();
                return Ok(positions);
            }
            positions.push(self.position()?);
            if self.separator() {
                self.bump();
                return Ok(positions);
            }
        }
    }

    fn position(&mut self) -> Result<Vec<LatticeArc>> {
        self.expect('(')?;
        let mut arcs = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(')') {
                self.bump();
                return Ok(arcs);
            }
            arcs.push(self.arc()?);
            if self.separator() {
                self.bump();
                return Ok(arcs);
            }
        }
    }

    fn arc(&mut self) -> Result<LatticeArc> {
        self.expect('(')?;
        self.skip_ws();
        let word = self.quoted()?;
        self.expect(',')?;
        let cost = self.number()?;
        self.expect(',')?;
        let span_start = self.pos;
        let span = self.number()?;
        if span.fract() != 0.0 || span < 1.0 {
            self.pos = span_start;
            return Err(self.error(format!("arc span must be a positive integer, got {span}")));
        }
        #[allow(clippy::cast_precision_loss)]
        let limit = usize::MAX as f64;
        if span >= limit {
            self.pos = span_start;
            return Err(self.error(format!("arc span {span} is too large")));
        }
        self.separator();
        self.expect(')')?;

        let label = self.vocab.intern_terminal(&word);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(LatticeArc::new(label, cost, span as usize))
    }

    fn quoted(&mut self) -> Result<String> {
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected quoted word")),
        };
        let mut word = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) => word.push(c),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) if c == quote => return Ok(word),
                Some(c) => word.push(c),
                None => return Err(self.error("unterminated word")),
            }
        }
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            self.bump();
        }
        let text = &self.input[start..self.pos];
        text.parse::<f64>().map_err(|_| {
            let mut err = self.error(format!("invalid number `{text}`"));
            if let ErrorKind::PlfSyntax { offset, .. } = &mut err.kind {
                *offset = start;
            }
            err
        })
    }
}

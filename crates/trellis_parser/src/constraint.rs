//! Per-sentence span constraints.
//!
//! A constraint string has one `;`-separated group per source position.
//! Group `i` is a `,`-separated list of permitted end positions for spans
//! starting at `i`, each either a single index or an inclusive `a-b` range:
//!
//! ```text
//! 0-2;1,3;2;3
//! ```
//!
//! Span `(i, i)` is always permitted.

use trellis_foundation::{Error, Result};

/// An `n x n` matrix of permitted spans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintMask {
    len: usize,
    allowed: Vec<bool>,
}

impl ConstraintMask {
    /// Parses `spec` for a sentence of `n` source positions.
    ///
    /// Empty groups are kept (they permit only the diagonal); a single
    /// trailing `;` does not start a new group. Empty list items are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of groups differs from `n`, if an
    /// item is not an index or range, or if an index is not below `n`.
    pub fn build(spec: &str, n: usize) -> Result<Self> {
        let groups = split_groups(spec);
        if groups.len() != n {
            return Err(Error::constraint_group_mismatch(n, groups.len()));
        }

        let mut mask = Self {
            len: n,
            allowed: vec![false; n * n],
        };
        for (i, group) in groups.iter().enumerate() {
            mask.set(i, i);
            for item in group.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let (start, end) = parse_item(item, i, n)?;
                for j in start..=end {
                    mask.set(i, j);
                }
            }
        }
        Ok(mask)
    }

    /// Returns the number of source positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for a mask over an empty sentence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether spans from `i` to `j` are permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if `i` or `j` is not below [`ConstraintMask::len`].
    pub fn allowed(&self, i: usize, j: usize) -> Result<bool> {
        if i >= self.len || j >= self.len {
            return Err(Error::span_out_of_bounds(i, j, self.len));
        }
        Ok(self.allowed[i * self.len + j])
    }

    fn set(&mut self, i: usize, j: usize) {
        self.allowed[i * self.len + j] = true;
    }
}

/// Splits on `;` keeping empty fields, except that a trailing empty field
/// is dropped.
fn split_groups(spec: &str) -> Vec<&str> {
    let mut groups: Vec<&str> = spec.split(';').collect();
    if groups.last().is_some_and(|g| g.is_empty()) {
        groups.pop();
    }
    groups
}

fn parse_item(item: &str, group: usize, n: usize) -> Result<(usize, usize)> {
    let index = |s: &str| -> Result<usize> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| Error::constraint_syntax(group, item))?;
        if value >= n {
            return Err(Error::span_out_of_bounds(group, value, n));
        }
        Ok(value)
    };

    match item.split_once('-') {
        None => {
            let j = index(item)?;
            Ok((j, j))
        }
        Some((a, b)) => {
            let (start, end) = (index(a)?, index(b)?);
            if start > end {
                return Err(Error::constraint_syntax(group, item));
            }
            Ok((start, end))
        }
    }
}

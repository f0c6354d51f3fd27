//! Span-indexed tables shared by the active and passive charts.

/// A square table with one cell per span `(i, j)`, `0 <= i, j <= n`.
///
/// Cells with `i > j` exist but are never filled.
#[derive(Clone, Debug)]
pub struct SpanTable<T> {
    width: usize,
    cells: Vec<T>,
}

impl<T: Default> SpanTable<T> {
    /// Creates a table for a lattice with `n` positions.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let width = n + 1;
        let mut cells = Vec::with_capacity(width * width);
        cells.resize_with(width * width, T::default);
        Self { width, cells }
    }
}

impl<T> SpanTable<T> {
    /// Returns the number of lattice positions the table covers.
    #[must_use]
    pub fn positions(&self) -> usize {
        self.width - 1
    }

    /// Returns the cell for span `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is greater than [`SpanTable::positions`].
    #[must_use]
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.cells[self.index(i, j)]
    }

    /// Returns the cell for span `(i, j)` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is greater than [`SpanTable::positions`].
    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        let idx = self.index(i, j);
        &mut self.cells[idx]
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.width && j < self.width,
            "span ({i},{j}) outside table of {} positions",
            self.width - 1
        );
        i * self.width + j
    }
}

//! A table recording the fixed cells written through it.

use ark_ff::PrimeField;
use std::collections::BTreeSet;

use super::{Assignment, AssignmentTable};
use crate::config::TableDescription;

/// An assignment table that remembers which constant and selector cells
/// were filled through it.
///
/// It is used when a part of the circuit, typically the filling of lookup
/// tables, needs to report which fixed columns and rows it occupied, e.g.
/// to reserve them before another part of the circuit is laid out.
#[derive(Debug, Clone)]
pub struct TrackedAssignment<F> {
    inner: Assignment<F>,
    /// (column, row) pairs of constants filled through this table.
    constant_cells: BTreeSet<(usize, usize)>,
    /// (column, row) pairs of selectors filled through this table.
    selector_cells: BTreeSet<(usize, usize)>,
}

impl<F: PrimeField> TrackedAssignment<F> {
    pub fn new(description: TableDescription) -> Self {
        Self::from(Assignment::new(description))
    }

    pub fn into_inner(self) -> Assignment<F> {
        self.inner
    }

    pub fn constant_cells(&self) -> &BTreeSet<(usize, usize)> {
        &self.constant_cells
    }

    pub fn selector_cells(&self) -> &BTreeSet<(usize, usize)> {
        &self.selector_cells
    }

    /// Indices of the constant columns touched at least once.
    pub fn constant_columns(&self) -> BTreeSet<usize> {
        self.constant_cells.iter().map(|(col, _)| *col).collect()
    }

    /// Indices of the selector columns touched at least once.
    pub fn selector_columns(&self) -> BTreeSet<usize> {
        self.selector_cells.iter().map(|(col, _)| *col).collect()
    }

    /// Forget the cells recorded so far, keeping the values.
    pub fn reset_tracking(&mut self) {
        self.constant_cells.clear();
        self.selector_cells.clear();
    }
}

impl<F> From<Assignment<F>> for TrackedAssignment<F> {
    fn from(inner: Assignment<F>) -> Self {
        Self {
            inner,
            constant_cells: BTreeSet::new(),
            selector_cells: BTreeSet::new(),
        }
    }
}

impl<F: PrimeField> AssignmentTable<F> for TrackedAssignment<F> {
    fn base(&self) -> &Assignment<F> {
        &self.inner
    }

    fn base_mut(&mut self) -> &mut Assignment<F> {
        &mut self.inner
    }

    fn fill_constant(&mut self, index: usize, row: usize, value: F) {
        *self.inner.constant_mut(index, row) = value;
        self.constant_cells.insert((index, row));
    }

    fn fill_selector(&mut self, index: usize, row: usize, value: F) {
        *self.inner.selector_mut(index, row) = value;
        self.selector_cells.insert((index, row));
    }
}

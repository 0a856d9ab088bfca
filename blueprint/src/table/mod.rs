//! The assignment table gadgets write their values into.
//!
//! [Assignment] is the storage. [AssignmentTable] is the interface gadgets
//! are written against: it forwards to an [Assignment] and exposes the
//! points a wrapping table may override, namely how constants and selectors
//! get filled. [TrackedAssignment] is such a wrapper.

use ark_ff::PrimeField;

mod assignment;
mod tracked;

pub use assignment::{Assignment, Column};
pub use tracked::TrackedAssignment;

use crate::var::Var;

pub trait AssignmentTable<F: PrimeField> {
    /// The storage this table reads from and writes to.
    fn base(&self) -> &Assignment<F>;

    fn base_mut(&mut self) -> &mut Assignment<F>;

    // ========================================================================
    // Reads. Reading a cell that was never written panics.
    // ========================================================================

    fn witness(&self, index: usize, row: usize) -> F {
        self.base().witness(index, row)
    }

    fn public_input(&self, index: usize, row: usize) -> F {
        self.base().public_input(index, row)
    }

    fn constant(&self, index: usize, row: usize) -> F {
        self.base().constant(index, row)
    }

    fn selector(&self, index: usize, row: usize) -> F {
        self.base().selector(index, row)
    }

    fn shared(&self, index: usize, row: usize) -> F {
        self.base().shared(index, row)
    }

    fn private_storage(&self, index: usize) -> F {
        self.base().private_storage(index)
    }

    // ========================================================================
    // Writes. Writing never fails on rows, it grows the column.
    // ========================================================================

    fn witness_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.base_mut().witness_mut(index, row)
    }

    fn public_input_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.base_mut().public_input_mut(index, row)
    }

    fn shared_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.base_mut().shared_mut(index, row)
    }

    fn private_storage_mut(&mut self, index: usize) -> &mut F {
        self.base_mut().private_storage_mut(index)
    }

    fn push_private_storage(&mut self, value: F) -> Var {
        self.base_mut().push_private_storage(value)
    }

    /// Write a constant cell.
    fn fill_constant(&mut self, index: usize, row: usize, value: F) {
        *self.base_mut().constant_mut(index, row) = value;
    }

    /// Write a selector cell.
    fn fill_selector(&mut self, index: usize, row: usize, value: F) {
        *self.base_mut().selector_mut(index, row) = value;
    }

    /// Set the selector `index` to one at `row`.
    fn enable_selector(&mut self, index: usize, row: usize) {
        self.fill_selector(index, row, F::one());
    }

    /// Enable the selector `index` at every `step`-th row from `from` to
    /// `to`, both included.
    fn enable_selector_range(&mut self, index: usize, from: usize, to: usize, step: usize) {
        assert!(step > 0, "enabling selector {index} with a step of zero");
        for row in (from..=to).step_by(step) {
            self.enable_selector(index, row);
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    fn rows_amount(&self) -> usize {
        self.base().rows_amount()
    }

    fn witnesses_amount(&self) -> usize {
        self.base().witnesses_amount()
    }

    fn public_inputs_amount(&self) -> usize {
        self.base().public_inputs_amount()
    }

    fn constants_amount(&self) -> usize {
        self.base().constants_amount()
    }

    fn selectors_amount(&self) -> usize {
        self.base().selectors_amount()
    }

    fn shareds_amount(&self) -> usize {
        self.base().shareds_amount()
    }

    fn witness_column_size(&self, index: usize) -> usize {
        self.base().witness_column_size(index)
    }

    fn public_input_column_size(&self, index: usize) -> usize {
        self.base().public_input_column_size(index)
    }

    fn constant_column_size(&self, index: usize) -> usize {
        self.base().constant_column_size(index)
    }

    fn selector_column_size(&self, index: usize) -> usize {
        self.base().selector_column_size(index)
    }

    fn shared_column_size(&self, index: usize) -> usize {
        self.base().shared_column_size(index)
    }

    fn private_storage_size(&self) -> usize {
        self.base().private_storage_size()
    }
}

impl<F: PrimeField> AssignmentTable<F> for Assignment<F> {
    fn base(&self) -> &Assignment<F> {
        self
    }

    fn base_mut(&mut self) -> &mut Assignment<F> {
        self
    }
}

//! `y = x + c` or `y = x - c` on a single row, `c` being a circuit constant.
//!
//! | w(0) | w(1)  | c(0) |
//! |------|-------|------|
//! | x    | x ± c | c    |
//!
//! The constant is read from the constant column, so instances with different
//! constants share a selector. The mode changes the gate and is part of the
//! selector identity.

use ark_ff::PrimeField;

use super::{ScalarOutput, MAX_WITNESS_AMOUNT};
use crate::{
    circuit::Circuit,
    component::{w, ColumnLayout, Component},
    error::ManifestError,
    expr::Expr,
    manifest::{Manifest, ManifestParam},
    resolve::var_value,
    table::AssignmentTable,
    var::Var,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantMode {
    Add,
    Sub,
}

#[derive(Debug, Clone)]
pub struct AddConstant<F> {
    layout: ColumnLayout,
    mode: ConstantMode,
    constant: F,
}

impl<F: PrimeField> AddConstant<F> {
    pub const NAME: &'static str = "add_constant";

    pub fn new(
        layout: ColumnLayout,
        mode: ConstantMode,
        constant: F,
    ) -> Result<Self, ManifestError> {
        <Self as Component<F>>::manifest().check(Self::NAME, &layout)?;
        Ok(Self {
            layout,
            mode,
            constant,
        })
    }

    pub fn mode(&self) -> ConstantMode {
        self.mode
    }

    fn apply(&self, x: F) -> F {
        match self.mode {
            ConstantMode::Add => x + self.constant,
            ConstantMode::Sub => x - self.constant,
        }
    }
}

impl<F: PrimeField> Component<F> for AddConstant<F> {
    type Input = Var;
    type Output = ScalarOutput;

    const NAME: &'static str = "add_constant";

    fn manifest() -> Manifest {
        Manifest::new(ManifestParam::range(2, MAX_WITNESS_AMOUNT)).with_constants(1)
    }

    fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn gates_amount(&self) -> usize {
        1
    }

    fn structural_params(&self) -> Vec<u64> {
        vec![self.mode as u64]
    }

    fn gates(&self) -> Vec<Vec<Expr<F>>> {
        let l = &self.layout;
        let c: Expr<F> = Var::constant_rel(l.c(0), 0).into();
        let shifted = match self.mode {
            ConstantMode::Add => w(l, 0, 0) + c,
            ConstantMode::Sub => w(l, 0, 0) - c,
        };
        vec![vec![shifted - w(l, 1, 0)]]
    }

    fn output(&self, _input: &Var, start_row: usize) -> ScalarOutput {
        ScalarOutput {
            output: Var::witness(self.layout.w(1), start_row),
        }
    }

    fn generate_assignments<T: AssignmentTable<F>>(
        &self,
        table: &mut T,
        input: &Var,
        start_row: usize,
    ) -> ScalarOutput {
        let x = var_value(table, input);
        table.fill_constant(self.layout.c(0), start_row, self.constant);
        *table.witness_mut(self.layout.w(0), start_row) = x;
        *table.witness_mut(self.layout.w(1), start_row) = self.apply(x);
        <Self as Component<F>>::output(self, input, start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Var,
        start_row: usize,
    ) {
        circuit.add_copy_constraint(*input, Var::witness(self.layout.w(0), start_row));
    }
}

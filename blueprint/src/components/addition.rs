//! `z = x + y` on a single row.
//!
//! | w(0) | w(1) | w(2)  |
//! |------|------|-------|
//! | x    | y    | x + y |

use ark_ff::PrimeField;

use super::{BinaryInput, ScalarOutput, MAX_WITNESS_AMOUNT, MIN_WITNESS_AMOUNT};
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

#[derive(Debug, Clone)]
pub struct Addition {
    layout: ColumnLayout,
}

impl Addition {
    pub const NAME: &'static str = "addition";

    pub fn new(layout: ColumnLayout) -> Result<Self, ManifestError> {
        Self::get_manifest().check(Self::NAME, &layout)?;
        Ok(Self { layout })
    }

    pub fn get_manifest() -> Manifest {
        Manifest::new(ManifestParam::range(MIN_WITNESS_AMOUNT, MAX_WITNESS_AMOUNT))
    }

    pub fn get_rows_amount(_witness_amount: usize) -> usize {
        1
    }

    pub fn get_gates_amount() -> usize {
        1
    }
}

impl<F: PrimeField> Component<F> for Addition {
    type Input = BinaryInput;
    type Output = ScalarOutput;

    const NAME: &'static str = Addition::NAME;

    fn manifest() -> Manifest {
        Self::get_manifest()
    }

    fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        Self::get_rows_amount(self.layout.witness_amount())
    }

    fn gates_amount(&self) -> usize {
        Self::get_gates_amount()
    }

    fn gates(&self) -> Vec<Vec<Expr<F>>> {
        let l = &self.layout;
        vec![vec![w(l, 0, 0) + w(l, 1, 0) - w(l, 2, 0)]]
    }

    fn output(&self, _input: &BinaryInput, start_row: usize) -> ScalarOutput {
        ScalarOutput {
            output: Var::witness(self.layout.w(2), start_row),
        }
    }

    fn generate_assignments<T: AssignmentTable<F>>(
        &self,
        table: &mut T,
        input: &BinaryInput,
        start_row: usize,
    ) -> ScalarOutput {
        let x = var_value(table, &input.x);
        let y = var_value(table, &input.y);
        *table.witness_mut(self.layout.w(0), start_row) = x;
        *table.witness_mut(self.layout.w(1), start_row) = y;
        *table.witness_mut(self.layout.w(2), start_row) = x + y;
        <Self as Component<F>>::output(self, input, start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &BinaryInput,
        start_row: usize,
    ) {
        circuit.add_copy_constraint(input.x, Var::witness(self.layout.w(0), start_row));
        circuit.add_copy_constraint(input.y, Var::witness(self.layout.w(1), start_row));
    }
}

//! Sum of `n >= 2` values, accumulated over `n - 1` rows.
//!
//! | row   | w(0)      | w(1) | w(2)                 | gate |
//! |-------|-----------|------|----------------------|------|
//! | 0     | x_0       | x_1  | s_1 = x_0 + x_1      | 0    |
//! | k > 0 | x_{k + 1} |      | s_{k+1} = s_k + x_{k+1} | 1    |
//!
//! The second gate reads the accumulator of the previous row, so the two
//! row shapes need distinct selectors. The number of summands does not
//! change the gates: every `Sum` on the same columns shares the same block.

use ark_ff::PrimeField;

use super::{ScalarOutput, MAX_WITNESS_AMOUNT, MIN_WITNESS_AMOUNT};
use crate::{
    circuit::Circuit,
    component::{w, ColumnLayout, Component},
    error::ManifestError,
    expr::Expr,
    manifest::{Manifest, ManifestParam},
    resolve::var_value,
    selector::SelectorBlock,
    table::AssignmentTable,
    var::Var,
};

#[derive(Debug, Clone)]
pub struct Sum {
    layout: ColumnLayout,
    inputs_amount: usize,
}

impl Sum {
    pub const NAME: &'static str = "sum";

    pub fn new(layout: ColumnLayout, inputs_amount: usize) -> Result<Self, ManifestError> {
        Self::get_manifest().check(Self::NAME, &layout)?;
        if inputs_amount < 2 {
            return Err(ManifestError::UnsupportedParameter(
                Self::NAME,
                format!("at least two summands are required, got {inputs_amount}"),
            ));
        }
        Ok(Self {
            layout,
            inputs_amount,
        })
    }

    pub fn get_manifest() -> Manifest {
        Manifest::new(ManifestParam::range(MIN_WITNESS_AMOUNT, MAX_WITNESS_AMOUNT))
    }

    pub fn get_rows_amount(_witness_amount: usize, inputs_amount: usize) -> usize {
        inputs_amount - 1
    }

    pub fn get_gates_amount() -> usize {
        2
    }

    pub fn inputs_amount(&self) -> usize {
        self.inputs_amount
    }

    fn check_input(&self, input: &[Var]) {
        assert_eq!(
            input.len(),
            self.inputs_amount,
            "the sum gadget was configured for {} summands",
            self.inputs_amount
        );
    }

    fn accumulator(&self, start_row: usize) -> Var {
        Var::witness(self.layout.w(2), start_row + self.inputs_amount - 2)
    }
}

impl<F: PrimeField> Component<F> for Sum {
    type Input = Vec<Var>;
    type Output = ScalarOutput;

    const NAME: &'static str = Sum::NAME;

    fn manifest() -> Manifest {
        Self::get_manifest()
    }

    fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        Self::get_rows_amount(self.layout.witness_amount(), self.inputs_amount)
    }

    fn gates_amount(&self) -> usize {
        Self::get_gates_amount()
    }

    fn gates(&self) -> Vec<Vec<Expr<F>>> {
        let l = &self.layout;
        let first_row = vec![w(l, 0, 0) + w(l, 1, 0) - w(l, 2, 0)];
        let next_rows = vec![w(l, 2, -1) + w(l, 0, 0) - w(l, 2, 0)];
        vec![first_row, next_rows]
    }

    fn output(&self, _input: &Vec<Var>, start_row: usize) -> ScalarOutput {
        ScalarOutput {
            output: self.accumulator(start_row),
        }
    }

    fn generate_assignments<T: AssignmentTable<F>>(
        &self,
        table: &mut T,
        input: &Vec<Var>,
        start_row: usize,
    ) -> ScalarOutput {
        self.check_input(input);
        let values: Vec<F> = input.iter().map(|v| var_value(table, v)).collect();
        let l = &self.layout;

        let mut acc = values[0] + values[1];
        *table.witness_mut(l.w(0), start_row) = values[0];
        *table.witness_mut(l.w(1), start_row) = values[1];
        *table.witness_mut(l.w(2), start_row) = acc;

        for (k, value) in values.iter().enumerate().skip(2) {
            let row = start_row + k - 1;
            acc += value;
            *table.witness_mut(l.w(0), row) = *value;
            *table.witness_mut(l.w(1), row) = F::zero();
            *table.witness_mut(l.w(2), row) = acc;
        }
        <Self as Component<F>>::output(self, input, start_row)
    }

    fn enable_selectors<T: AssignmentTable<F>>(
        &self,
        table: &mut T,
        block: SelectorBlock,
        start_row: usize,
    ) {
        table.enable_selector(block.selector(0), start_row);
        let last_row = start_row + self.inputs_amount - 2;
        if last_row > start_row {
            table.enable_selector_range(block.selector(1), start_row + 1, last_row, 1);
        }
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Vec<Var>,
        start_row: usize,
    ) {
        self.check_input(input);
        let l = &self.layout;
        circuit.add_copy_constraint(input[0], Var::witness(l.w(0), start_row));
        circuit.add_copy_constraint(input[1], Var::witness(l.w(1), start_row));
        for (k, v) in input.iter().enumerate().skip(2) {
            circuit.add_copy_constraint(*v, Var::witness(l.w(0), start_row + k - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TableDescription, table::Assignment};
    use ark_bn254::Fr;
    use ark_ff::{One, Zero};

    #[test]
    fn test_rejects_single_summand() {
        assert!(matches!(
            Sum::new(ColumnLayout::contiguous(3, 0, 0), 1),
            Err(ManifestError::UnsupportedParameter("sum", _))
        ));
    }

    #[test]
    fn test_rows_and_selectors() {
        let component = Sum::new(ColumnLayout::contiguous(3, 0, 0), 4).unwrap();
        assert_eq!(Component::<Fr>::rows_amount(&component), 3);

        let mut circuit = Circuit::<Fr>::new();
        let mut table = Assignment::<Fr>::new(TableDescription::new(3, 1, 0, 0));
        let input: Vec<Var> = (0..4).map(|i| Var::public_input(0, i)).collect();
        let out = component.generate_circuit(&mut circuit, &mut table, &input, 1);
        assert_eq!(out.output, Var::witness(2, 3));

        assert_eq!(circuit.gates_amount(), 2);
        assert_eq!(table.selector(0, 1), Fr::one());
        assert_eq!(table.selector_column_size(0), 2);
        assert_eq!(table.selector(1, 1), Fr::zero());
        assert_eq!(table.selector(1, 2), Fr::one());
        assert_eq!(table.selector(1, 3), Fr::one());
        assert_eq!(circuit.copy_constraints().len(), 4);
    }

    #[test]
    fn test_two_summands_use_only_the_first_gate() {
        let component = Sum::new(ColumnLayout::contiguous(3, 0, 0), 2).unwrap();
        let mut circuit = Circuit::<Fr>::new();
        let mut table = Assignment::<Fr>::new(TableDescription::new(3, 1, 0, 0));
        let input = vec![Var::public_input(0, 0), Var::public_input(0, 1)];
        component.generate_circuit(&mut circuit, &mut table, &input, 0);
        assert_eq!(table.selectors_amount(), 1);
        assert_eq!(circuit.selectors_amount(), 2);
    }

    #[test]
    #[should_panic(expected = "configured for 3 summands")]
    fn test_circuit_rejects_a_wrong_number_of_summands() {
        let component = Sum::new(ColumnLayout::contiguous(3, 0, 0), 3).unwrap();
        let mut circuit = Circuit::<Fr>::new();
        let mut table = Assignment::<Fr>::new(TableDescription::new(3, 1, 0, 0));
        let input: Vec<Var> = (0..6).map(|i| Var::public_input(0, i)).collect();
        component.generate_circuit(&mut circuit, &mut table, &input, 0);
    }

    #[test]
    #[should_panic(expected = "configured for 4 summands")]
    fn test_assignment_rejects_a_wrong_number_of_summands() {
        let component = Sum::new(ColumnLayout::contiguous(3, 0, 0), 4).unwrap();
        let mut table = Assignment::<Fr>::new(TableDescription::new(3, 1, 0, 0));
        let input = vec![Var::public_input(0, 0), Var::public_input(0, 1)];
        component.generate_assignments(&mut table, &input, 0);
    }

    #[test]
    fn test_assignment_accumulates() {
        let component = Sum::new(ColumnLayout::contiguous(3, 0, 0), 5).unwrap();
        let mut table = Assignment::<Fr>::new(TableDescription::new(3, 1, 0, 0));
        for i in 0..5 {
            *table.public_input_mut(0, i) = Fr::from(i as u64 + 1);
        }
        let input: Vec<Var> = (0..5).map(|i| Var::public_input(0, i)).collect();
        let out = component.generate_assignments(&mut table, &input, 0);
        assert_eq!(var_value(&table, &out.output), Fr::from(15u64));
        assert_eq!(table.rows_amount(), 4);
        assert_eq!(table.witness(2, 1), Fr::from(6u64));
    }
}

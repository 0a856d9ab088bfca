//! `x * y + z`, composed of a [Multiplication] followed by an [Addition].
//!
//! The gadget has no gate of its own: both children register theirs through
//! the selector cache, so it costs no selector beyond what a standalone
//! multiplication and addition on the same columns already use.

use ark_ff::PrimeField;

use super::{Addition, BinaryInput, Multiplication, ScalarOutput};
use crate::{
    circuit::Circuit,
    component::{merged_manifest, ColumnLayout, Component},
    error::ManifestError,
    manifest::Manifest,
    selector::SelectorBlock,
    table::AssignmentTable,
    var::Var,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyAddInput {
    pub x: Var,
    pub y: Var,
    pub z: Var,
}

#[derive(Debug, Clone)]
pub struct MultiplyAdd {
    layout: ColumnLayout,
    mul: Multiplication,
    add: Addition,
}

impl MultiplyAdd {
    pub const NAME: &'static str = "multiply_add";

    /// Fails if either child rejects `layout`.
    pub fn new(layout: ColumnLayout) -> Result<Self, ManifestError> {
        Ok(Self {
            mul: Multiplication::new(layout.clone())?,
            add: Addition::new(layout.clone())?,
            layout,
        })
    }

    pub fn get_rows_amount(witness_amount: usize) -> usize {
        Multiplication::get_rows_amount(witness_amount) + Addition::get_rows_amount(witness_amount)
    }

    fn add_start_row(&self, start_row: usize) -> usize {
        start_row + Multiplication::get_rows_amount(self.layout.witness_amount())
    }

    fn add_input(&self, product: ScalarOutput, z: Var) -> BinaryInput {
        BinaryInput {
            x: product.output,
            y: z,
        }
    }
}

impl<F: PrimeField> Component<F> for MultiplyAdd {
    type Input = MultiplyAddInput;
    type Output = ScalarOutput;

    const NAME: &'static str = MultiplyAdd::NAME;

    /// Intersection of the children's manifests.
    fn manifest() -> Manifest {
        merged_manifest::<F, Multiplication, Addition>()
            .unwrap_or_else(|_| Manifest::unsatisfiable())
    }

    fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        Self::get_rows_amount(self.layout.witness_amount())
    }

    fn gates_amount(&self) -> usize {
        0
    }

    fn output(&self, input: &MultiplyAddInput, start_row: usize) -> ScalarOutput {
        let mul_input = BinaryInput {
            x: input.x,
            y: input.y,
        };
        let product = Component::<F>::output(&self.mul, &mul_input, start_row);
        Component::<F>::output(
            &self.add,
            &self.add_input(product, input.z),
            self.add_start_row(start_row),
        )
    }

    fn generate_assignments<T: AssignmentTable<F>>(
        &self,
        table: &mut T,
        input: &MultiplyAddInput,
        start_row: usize,
    ) -> ScalarOutput {
        let mul_input = BinaryInput {
            x: input.x,
            y: input.y,
        };
        let product = self.mul.generate_assignments(table, &mul_input, start_row);
        self.add.generate_assignments(
            table,
            &self.add_input(product, input.z),
            self.add_start_row(start_row),
        )
    }

    /// Registers the children's gates. The gadget itself owns no selector.
    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Option<SelectorBlock> {
        Component::<F>::generate_gates(&self.mul, circuit);
        Component::<F>::generate_gates(&self.add, circuit);
        None
    }

    fn generate_copy_constraints(
        &self,
        _circuit: &mut Circuit<F>,
        _input: &MultiplyAddInput,
        _start_row: usize,
    ) {
        // Inputs are wired by the children in generate_circuit.
    }

    fn generate_circuit<T: AssignmentTable<F>>(
        &self,
        circuit: &mut Circuit<F>,
        table: &mut T,
        input: &MultiplyAddInput,
        start_row: usize,
    ) -> ScalarOutput {
        let mul_input = BinaryInput {
            x: input.x,
            y: input.y,
        };
        let product = self
            .mul
            .generate_circuit(circuit, table, &mul_input, start_row);
        self.add.generate_circuit(
            circuit,
            table,
            &self.add_input(product, input.z),
            self.add_start_row(start_row),
        )
    }
}

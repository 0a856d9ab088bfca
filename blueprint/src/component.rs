//! The protocol every gadget implements.
//!
//! A gadget is placed at a `start_row` and occupies `rows_amount` rows. It is
//! built in two independent passes over the same row layout:
//!
//! 1. [Component::generate_assignments] computes the values and writes them
//!    into the assignment table;
//! 2. [Component::generate_circuit] registers the gates (once per gate
//!    shape, through the selector cache), enables the selectors at the
//!    gadget's rows and wires the inputs with copy constraints.
//!
//! Both passes return the same [Component::Output]: variables naming the
//! cells holding the gadget's results, never raw values. A parent gadget
//! places its children one after the other, advancing its row counter by
//! each child's `rows_amount`, and feeds a child's output variables to the
//! next child's input. The row arithmetic must be identical in both passes.

use ark_ff::PrimeField;

use crate::{
    circuit::Circuit,
    error::ManifestError,
    expr::Expr,
    manifest::Manifest,
    selector::{ComponentIdentity, SelectorBlock},
    table::AssignmentTable,
    var::Var,
};

/// Mapping from a gadget's local column indices to the global columns of the
/// table. `w(0)` is the first witness column the gadget writes to, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    witnesses: Vec<usize>,
    constants: Vec<usize>,
    public_inputs: Vec<usize>,
}

impl ColumnLayout {
    pub fn new(witnesses: Vec<usize>, constants: Vec<usize>, public_inputs: Vec<usize>) -> Self {
        Self {
            witnesses,
            constants,
            public_inputs,
        }
    }

    /// Columns `0..n` of each family.
    pub fn contiguous(witnesses: usize, constants: usize, public_inputs: usize) -> Self {
        Self::new(
            (0..witnesses).collect(),
            (0..constants).collect(),
            (0..public_inputs).collect(),
        )
    }

    pub fn w(&self, i: usize) -> usize {
        self.witnesses[i]
    }

    pub fn c(&self, i: usize) -> usize {
        self.constants[i]
    }

    pub fn pi(&self, i: usize) -> usize {
        self.public_inputs[i]
    }

    pub fn witnesses(&self) -> &[usize] {
        &self.witnesses
    }

    pub fn constants(&self) -> &[usize] {
        &self.constants
    }

    pub fn public_inputs(&self) -> &[usize] {
        &self.public_inputs
    }

    pub fn witness_amount(&self) -> usize {
        self.witnesses.len()
    }

    pub fn constant_amount(&self) -> usize {
        self.constants.len()
    }

    pub fn public_input_amount(&self) -> usize {
        self.public_inputs.len()
    }

    /// The same layout restricted to its first `n` witness columns.
    pub fn first_witnesses(&self, n: usize) -> Self {
        Self::new(
            self.witnesses[..n].to_vec(),
            self.constants.clone(),
            self.public_inputs.clone(),
        )
    }
}

pub trait Component<F: PrimeField> {
    /// Variables the gadget reads.
    type Input;

    /// Variables naming the cells the gadget writes its results to.
    type Output;

    /// Name of the gadget type, part of its selector identity.
    const NAME: &'static str;

    /// Column counts the gadget accepts.
    fn manifest() -> Manifest
    where
        Self: Sized;

    fn layout(&self) -> &ColumnLayout;

    fn rows_amount(&self) -> usize;

    /// Number of selectors of the gadget's own gates.
    fn gates_amount(&self) -> usize;

    /// Parameters changing the shape of the gates, beyond the layout.
    fn structural_params(&self) -> Vec<u64> {
        vec![]
    }

    fn identity(&self) -> ComponentIdentity {
        let layout = self.layout();
        ComponentIdentity::new(Self::NAME)
            .with_params(self.structural_params())
            .with_witnesses(layout.witnesses())
            .with_constants(layout.constants())
            .with_public_inputs(layout.public_inputs())
    }

    /// Constraints of each gate, one vector per selector of the block, in
    /// block order. Constraints use relative rows.
    fn gates(&self) -> Vec<Vec<Expr<F>>> {
        vec![]
    }

    /// Output variables of the gadget placed at `start_row`.
    fn output(&self, input: &Self::Input, start_row: usize) -> Self::Output;

    /// Compute and write the gadget's values, starting at `start_row`.
    fn generate_assignments<T: AssignmentTable<F>>(
        &self,
        table: &mut T,
        input: &Self::Input,
        start_row: usize,
    ) -> Self::Output;

    /// Register the gadget's gates, unless a gadget of the same identity
    /// already did. Returns the selector block of the gadget, `None` if it
    /// has no gate of its own.
    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Option<SelectorBlock> {
        let gates_amount = self.gates_amount();
        if gates_amount == 0 {
            return None;
        }
        let block = circuit.get_or_generate_gates(self.identity(), gates_amount, |circuit, block| {
            let gates = self.gates();
            assert_eq!(
                gates.len(),
                block.amount,
                "{} declares {} gates but generates {}",
                Self::NAME,
                block.amount,
                gates.len()
            );
            for (i, constraints) in gates.into_iter().enumerate() {
                circuit.add_gate_with_selector(block.selector(i), constraints);
            }
        });
        Some(block)
    }

    /// Enable the selectors of `block` at the gadget's rows. By default, a
    /// single gate applied to the first row.
    fn enable_selectors<T: AssignmentTable<F>>(
        &self,
        table: &mut T,
        block: SelectorBlock,
        start_row: usize,
    ) {
        table.enable_selector(block.first, start_row);
    }

    /// Wire the input variables to the cells the gadget reads them from.
    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    );

    /// Gates, selectors and copy constraints of the gadget placed at
    /// `start_row`. It never computes values.
    fn generate_circuit<T: AssignmentTable<F>>(
        &self,
        circuit: &mut Circuit<F>,
        table: &mut T,
        input: &Self::Input,
        start_row: usize,
    ) -> Self::Output {
        if let Some(block) = self.generate_gates(circuit) {
            self.enable_selectors(table, block, start_row);
        }
        self.generate_copy_constraints(circuit, input, start_row);
        self.output(input, start_row)
    }
}

/// Manifest accepted by both `A` and `B` when laid out on the same columns,
/// as a parent chaining the two gadgets needs.
pub fn merged_manifest<F, A, B>() -> Result<Manifest, ManifestError>
where
    F: PrimeField,
    A: Component<F>,
    B: Component<F>,
{
    A::manifest().merge_with(&B::manifest())
}

/// Relative witness cell `w(i)` of `layout` as an expression.
pub fn w<F: PrimeField>(layout: &ColumnLayout, i: usize, offset: i32) -> Expr<F> {
    Var::witness_rel(layout.w(i), offset).into()
}

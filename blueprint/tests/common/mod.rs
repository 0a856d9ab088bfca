//! Helpers shared by the integration tests.

#![allow(dead_code)]

use ark_bn254::Fr;
use blueprint::{
    circuit::Circuit,
    component::Component,
    config::TableDescription,
    satisfiability::is_satisfied,
    table::{Assignment, AssignmentTable},
    var::Var,
};

/// Route the library's logs to the test output, once per test binary.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Table with `witnesses` witness columns, one public input column and one
/// constant column.
pub fn table(witnesses: usize) -> Assignment<Fr> {
    Assignment::new(TableDescription::new(witnesses, 1, 1, 0))
}

/// Write `values` in the public input column 0, starting at row 0, and
/// return the variables naming them.
pub fn place_inputs<T: AssignmentTable<Fr>>(table: &mut T, values: &[Fr]) -> Vec<Var> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            *table.public_input_mut(0, row) = *value;
            Var::public_input(0, row)
        })
        .collect()
}

/// Run both passes of `component` at `start_row`.
///
/// Panics if the two passes disagree on the output variables.
pub fn run<C, T>(
    component: &C,
    circuit: &mut Circuit<Fr>,
    table: &mut T,
    input: &C::Input,
    start_row: usize,
) -> C::Output
where
    C: Component<Fr>,
    C::Output: PartialEq + std::fmt::Debug,
    T: AssignmentTable<Fr>,
{
    init_logger();
    let assigned = component.generate_assignments(table, input, start_row);
    let wired = component.generate_circuit(circuit, table, input, start_row);
    assert_eq!(assigned, wired, "both passes must name the same output cells");
    wired
}

pub fn assert_satisfied<T: AssignmentTable<Fr>>(circuit: &Circuit<Fr>, table: &T) {
    if let Err(e) = is_satisfied(circuit, table) {
        panic!("the assignment does not satisfy the circuit: {e}");
    }
}

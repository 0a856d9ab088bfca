//! Check that an assignment satisfies a circuit.
//!
//! Every constraint of every gate must vanish at each row where the gate's
//! selector is one, and both cells of every copy constraint must hold the
//! same value. This is what a prover would reject, evaluated directly on the
//! table, and is what the tests of the gadgets rely on.

use ark_ff::PrimeField;
use log::debug;

use crate::{
    circuit::{Circuit, Gate},
    column::ColumnKind,
    error::SatisfiabilityError,
    resolve::try_var_value,
    table::AssignmentTable,
    var::{RowRef, Var},
};

/// Check the gates, then the copy constraints, stopping at the first
/// violation.
pub fn is_satisfied<F, T>(circuit: &Circuit<F>, table: &T) -> Result<(), SatisfiabilityError>
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
{
    for gate in circuit.gates() {
        check_gate(gate, table)?;
    }
    check_copy_constraints(circuit, table)?;
    debug!(
        "The table satisfies {} gates and {} copy constraints",
        circuit.gates_amount(),
        circuit.copy_constraints().len()
    );
    Ok(())
}

/// Rows at which `selector_index` is enabled. A selector column that was
/// never written is enabled nowhere.
pub fn enabled_rows<F, T>(table: &T, selector_index: usize) -> Vec<usize>
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
{
    let base = table.base();
    if selector_index >= base.selectors_amount() {
        return vec![];
    }
    (0..base.selector_column_size(selector_index))
        .filter(|row| base.get(ColumnKind::Selector, selector_index, *row) == Some(F::one()))
        .collect()
}

fn check_gate<F, T>(gate: &Gate<F>, table: &T) -> Result<(), SatisfiabilityError>
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
{
    for row in enabled_rows(table, gate.selector_index) {
        for (constraint, expr) in gate.constraints.iter().enumerate() {
            let value = expr.evaluate(&|v| {
                let bound = v.row.resolve(row)?;
                try_var_value(table, &Var::new(v.kind, v.index, RowRef::Absolute(bound)))
            });
            match value {
                None => {
                    return Err(SatisfiabilityError::GateOutOfTable {
                        selector: gate.selector_index,
                        constraint,
                        row,
                    })
                }
                Some(v) if !v.is_zero() => {
                    return Err(SatisfiabilityError::GateNotSatisfied {
                        selector: gate.selector_index,
                        constraint,
                        row,
                        expression: expr.to_string(),
                    })
                }
                Some(_) => (),
            }
        }
    }
    Ok(())
}

fn check_copy_constraints<F, T>(circuit: &Circuit<F>, table: &T) -> Result<(), SatisfiabilityError>
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
{
    for copy in circuit.copy_constraints() {
        let a = try_var_value(table, &copy.first);
        let b = try_var_value(table, &copy.second);
        match (a, b) {
            (Some(a), Some(b)) if a == b => (),
            (Some(_), Some(_)) => {
                return Err(SatisfiabilityError::CopyConstraintViolated(
                    copy.first,
                    copy.second,
                ))
            }
            _ => {
                return Err(SatisfiabilityError::CopyConstraintOutOfTable(
                    copy.first,
                    copy.second,
                ))
            }
        }
    }
    Ok(())
}

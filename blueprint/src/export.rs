//! Textual dumps of an assignment table and of a circuit.
//!
//! The table format is read by external tooling and must stay stable:
//!
//! ```text
//! witnesses_size: 2 public_inputs_size: 1 constants_size: 1 selectors_size: 1 max_size: 1
//! 3 4 | 7 | 0 | 1
//! ```
//!
//! Each data line lists the witness values, the public inputs, the constants
//! and the selectors of one row. Values are the canonical integer of the
//! field element in hexadecimal, selectors are printed in decimal. A row
//! beyond the end of a column is printed as zero.

use ark_ff::PrimeField;
use itertools::Itertools;
use num_bigint::BigUint;
use std::io::{Result, Write};

use crate::{
    circuit::Circuit,
    column::ColumnKind,
    table::{AssignmentTable, Column},
};

/// Number of hexadecimal digits of the field modulus.
pub fn hex_width<F: PrimeField>() -> usize {
    (F::MODULUS_BIT_SIZE as usize).div_ceil(4)
}

fn to_biguint<F: PrimeField>(value: F) -> BigUint {
    value.into_bigint().into()
}

fn cell<F: PrimeField>(column: &Column<F>, row: usize) -> F {
    column.get(row).unwrap_or_else(F::zero)
}

fn hex_value<F: PrimeField>(value: F, width: usize) -> String {
    format!("{:0width$x}", to_biguint(value), width = width)
}

/// Write `table` to `sink`, one line per row.
///
/// With `wide`, every hexadecimal value is zero-padded to the width of the
/// field modulus, so that the columns line up.
pub fn export_table<F, T, W>(table: &T, sink: &mut W, wide: bool) -> Result<()>
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
    W: Write,
{
    let base = table.base();
    let witnesses = base.columns(ColumnKind::Witness);
    let public_inputs = base.columns(ColumnKind::PublicInput);
    let constants = base.columns(ColumnKind::Constant);
    let selectors = base.columns(ColumnKind::Selector);
    let max_size = base.max_column_size();
    let width = if wide { hex_width::<F>() } else { 0 };

    writeln!(
        sink,
        "witnesses_size: {} public_inputs_size: {} constants_size: {} selectors_size: {} max_size: {}",
        witnesses.len(),
        public_inputs.len(),
        constants.len(),
        selectors.len(),
        max_size
    )?;

    for row in 0..max_size {
        for family in [witnesses, public_inputs, constants] {
            for column in family {
                write!(sink, "{} ", hex_value(cell(column, row), width))?;
            }
            write!(sink, "| ")?;
        }
        let selector_values = selectors
            .iter()
            .map(|column| to_biguint(cell(column, row)))
            .join(" ");
        writeln!(sink, "{selector_values}")?;
    }
    Ok(())
}

/// Write the gates and the copy constraints of `circuit` to `sink`.
///
/// ```text
/// gate 0: ((w[0] + w[1]) - w[2])
/// copy w[0]#0 == pi[0]#0
/// ```
pub fn export_circuit<F, W>(circuit: &Circuit<F>, sink: &mut W) -> Result<()>
where
    F: PrimeField,
    W: Write,
{
    for gate in circuit.gates() {
        writeln!(
            sink,
            "gate {}: {}",
            gate.selector_index,
            gate.constraints.iter().join("; ")
        )?;
    }
    for copy in circuit.copy_constraints() {
        writeln!(sink, "copy {} == {}", copy.first, copy.second)?;
    }
    Ok(())
}

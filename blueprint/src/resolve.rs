//! Mapping variables to the values they name in a table.

use ark_ff::PrimeField;

use crate::{column::ColumnKind, table::AssignmentTable, var::Var};

/// Value of `var` in `table`, or `None` if the cell does not exist.
///
/// The dispatch is:
/// - private storage slots (either encoding) read the private storage at
///   the variable's row, whatever the nominal index;
/// - public input variables with a non-zero index read the shared column
///   `index - 1`;
/// - every other variable reads its own family.
///
/// Panics on relative variables, see [var_value_at].
pub fn try_var_value<F, T>(table: &T, var: &Var) -> Option<F>
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
{
    let row = var.absolute_row();
    let base = table.base();
    if var.is_private_storage() {
        return base.get(ColumnKind::PrivateStorage, 0, row);
    }
    if var.kind == ColumnKind::PublicInput && var.index > 0 {
        return base.get_shared(var.index - 1, row);
    }
    base.get(var.kind, var.index, row)
}

/// Value of `var` in `table`.
///
/// Panics if the cell was never written: gadgets must only build variables
/// naming cells of the table they resolve them against.
pub fn var_value<F, T>(table: &T, var: &Var) -> F
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
{
    match try_var_value(table, var) {
        Some(value) => value,
        None => panic!("variable {var} names a cell that is not in the table"),
    }
}

/// Value of `var` once bound to `current_row`. Absolute variables ignore
/// `current_row`.
pub fn var_value_at<F, T>(table: &T, var: &Var, current_row: usize) -> F
where
    F: PrimeField,
    T: AssignmentTable<F> + ?Sized,
{
    var_value(table, &var.at_row(current_row))
}

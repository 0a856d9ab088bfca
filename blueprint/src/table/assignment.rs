//! Column storage of the assignment table.

use ark_ff::Field;
use log::trace;

use crate::{column::ColumnKind, config::TableDescription, var::Var};

/// A growable column of field elements.
///
/// Writing past the end grows the column, filling the new rows with zero.
/// Reading past the end is a bug in the caller and panics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column<F> {
    values: Vec<F>,
}

impl<F: Field> Column<F> {
    pub fn new() -> Self {
        Self { values: vec![] }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<F> {
        self.values.get(row).copied()
    }

    /// Mutable access to `row`, growing the column to `row + 1` rows if
    /// needed.
    pub fn get_mut_or_grow(&mut self, row: usize) -> &mut F {
        if row >= self.values.len() {
            self.values.resize(row + 1, F::zero());
        }
        &mut self.values[row]
    }

    pub fn values(&self) -> &[F] {
        &self.values
    }
}

/// The assignment table: column storage for every family plus the private
/// storage.
///
/// The table only grows. `rows_amount` is the number of rows the prover
/// must consider: one more than the largest witness or constant row ever
/// written.
#[derive(Debug, Clone)]
pub struct Assignment<F> {
    description: TableDescription,
    witnesses: Vec<Column<F>>,
    public_inputs: Vec<Column<F>>,
    constants: Vec<Column<F>>,
    selectors: Vec<Column<F>>,
    shared: Vec<Column<F>>,
    private_storage: Vec<F>,
    allocated_rows: usize,
}

fn column_or_panic<'a, F>(family: &'a [Column<F>], kind: &str, index: usize) -> &'a Column<F> {
    match family.get(index) {
        Some(column) => column,
        None => panic!(
            "{kind} column {index} does not exist, the table declares {} of them",
            family.len()
        ),
    }
}

fn read_or_panic<F: Field>(family: &[Column<F>], kind: &str, index: usize, row: usize) -> F {
    let column = column_or_panic(family, kind, index);
    match column.get(row) {
        Some(value) => value,
        None => panic!(
            "{kind} column {index} has {} rows, row {row} was never written",
            column.len()
        ),
    }
}

fn write_or_panic<'a, F: Field>(
    family: &'a mut [Column<F>],
    kind: &str,
    index: usize,
    row: usize,
) -> &'a mut F {
    let declared = family.len();
    match family.get_mut(index) {
        Some(column) => {
            if row >= column.len() {
                trace!("growing {kind} column {index} from {} to {} rows", column.len(), row + 1);
            }
            column.get_mut_or_grow(row)
        }
        None => panic!("{kind} column {index} does not exist, the table declares {declared} of them"),
    }
}

impl<F: Field> Assignment<F> {
    pub fn new(description: TableDescription) -> Self {
        Self {
            description,
            witnesses: vec![Column::new(); description.witness_columns],
            public_inputs: vec![Column::new(); description.public_input_columns],
            constants: vec![Column::new(); description.constant_columns],
            selectors: vec![Column::new(); description.selector_columns],
            shared: vec![Column::new(); description.shared_columns],
            private_storage: vec![],
            allocated_rows: 0,
        }
    }

    /// The description the table was created with. Selector columns created
    /// on demand afterwards are not reflected here, see
    /// [Assignment::selectors_amount].
    pub fn description(&self) -> TableDescription {
        self.description
    }

    // ------------------------------------------------------------------------
    // Witness

    pub fn witness(&self, index: usize, row: usize) -> F {
        read_or_panic(&self.witnesses, "witness", index, row)
    }

    pub fn witness_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.allocated_rows = std::cmp::max(self.allocated_rows, row + 1);
        write_or_panic(&mut self.witnesses, "witness", index, row)
    }

    pub fn witnesses_amount(&self) -> usize {
        self.witnesses.len()
    }

    pub fn witness_column_size(&self, index: usize) -> usize {
        column_or_panic(&self.witnesses, "witness", index).len()
    }

    // ------------------------------------------------------------------------
    // Public inputs

    pub fn public_input(&self, index: usize, row: usize) -> F {
        read_or_panic(&self.public_inputs, "public input", index, row)
    }

    pub fn public_input_mut(&mut self, index: usize, row: usize) -> &mut F {
        write_or_panic(&mut self.public_inputs, "public input", index, row)
    }

    pub fn public_inputs_amount(&self) -> usize {
        self.public_inputs.len()
    }

    pub fn public_input_column_size(&self, index: usize) -> usize {
        column_or_panic(&self.public_inputs, "public input", index).len()
    }

    // ------------------------------------------------------------------------
    // Constants

    pub fn constant(&self, index: usize, row: usize) -> F {
        read_or_panic(&self.constants, "constant", index, row)
    }

    pub fn constant_mut(&mut self, index: usize, row: usize) -> &mut F {
        self.allocated_rows = std::cmp::max(self.allocated_rows, row + 1);
        write_or_panic(&mut self.constants, "constant", index, row)
    }

    pub fn constants_amount(&self) -> usize {
        self.constants.len()
    }

    pub fn constant_column_size(&self, index: usize) -> usize {
        column_or_panic(&self.constants, "constant", index).len()
    }

    // ------------------------------------------------------------------------
    // Selectors

    pub fn selector(&self, index: usize, row: usize) -> F {
        read_or_panic(&self.selectors, "selector", index, row)
    }

    /// Mutable access to a selector cell. Unlike the other families, the
    /// selector family itself grows when `index` is beyond the current
    /// column count.
    pub fn selector_mut(&mut self, index: usize, row: usize) -> &mut F {
        if index >= self.selectors.len() {
            trace!("adding selector columns up to index {index}");
            self.selectors.resize(index + 1, Column::new());
        }
        write_or_panic(&mut self.selectors, "selector", index, row)
    }

    pub fn selectors_amount(&self) -> usize {
        self.selectors.len()
    }

    pub fn selector_column_size(&self, index: usize) -> usize {
        column_or_panic(&self.selectors, "selector", index).len()
    }

    // ------------------------------------------------------------------------
    // Shared columns

    pub fn shared(&self, index: usize, row: usize) -> F {
        read_or_panic(&self.shared, "shared", index, row)
    }

    /// Write access for the stage producing the shared columns.
    pub fn shared_mut(&mut self, index: usize, row: usize) -> &mut F {
        write_or_panic(&mut self.shared, "shared", index, row)
    }

    pub fn shareds_amount(&self) -> usize {
        self.shared.len()
    }

    pub fn shared_column_size(&self, index: usize) -> usize {
        column_or_panic(&self.shared, "shared", index).len()
    }

    // ------------------------------------------------------------------------
    // Private storage

    pub fn private_storage(&self, index: usize) -> F {
        match self.private_storage.get(index) {
            Some(value) => *value,
            None => panic!(
                "private storage has {} slots, slot {index} was never written",
                self.private_storage.len()
            ),
        }
    }

    /// Mutable access to a private storage slot, growing the storage to
    /// `index + 1` slots if needed.
    pub fn private_storage_mut(&mut self, index: usize) -> &mut F {
        if index >= self.private_storage.len() {
            self.private_storage.resize(index + 1, F::zero());
        }
        &mut self.private_storage[index]
    }

    /// Append `value` to the private storage and return the variable
    /// naming its slot.
    pub fn push_private_storage(&mut self, value: F) -> Var {
        self.private_storage.push(value);
        Var::private_storage(self.private_storage.len() - 1)
    }

    pub fn private_storage_size(&self) -> usize {
        self.private_storage.len()
    }

    pub fn resize_private_storage(&mut self, size: usize) {
        self.private_storage.resize(size, F::zero());
    }

    pub fn clear_private_storage(&mut self) {
        self.private_storage.clear();
    }

    // ------------------------------------------------------------------------

    /// One more than the largest witness or constant row written so far.
    pub fn rows_amount(&self) -> usize {
        self.allocated_rows
    }

    /// Non-panicking read of a single cell of a family.
    ///
    /// For [ColumnKind::PrivateStorage] the index is ignored and `row` is
    /// the slot number.
    pub fn get(&self, kind: ColumnKind, index: usize, row: usize) -> Option<F> {
        let family = match kind {
            ColumnKind::Witness => &self.witnesses,
            ColumnKind::PublicInput => &self.public_inputs,
            ColumnKind::Constant => &self.constants,
            ColumnKind::Selector => &self.selectors,
            ColumnKind::PrivateStorage => return self.private_storage.get(row).copied(),
        };
        family.get(index).and_then(|column| column.get(row))
    }

    /// Every column of a table family.
    ///
    /// Panics on [ColumnKind::PrivateStorage], which is not made of columns.
    pub fn columns(&self, kind: ColumnKind) -> &[Column<F>] {
        match kind {
            ColumnKind::Witness => &self.witnesses,
            ColumnKind::PublicInput => &self.public_inputs,
            ColumnKind::Constant => &self.constants,
            ColumnKind::Selector => &self.selectors,
            ColumnKind::PrivateStorage => panic!("the private storage has no columns"),
        }
    }

    /// Non-panicking read of a shared cell.
    pub fn get_shared(&self, index: usize, row: usize) -> Option<F> {
        self.shared.get(index).and_then(|column| column.get(row))
    }

    /// Largest column length over the witness, public input, constant and
    /// selector families.
    pub fn max_column_size(&self) -> usize {
        self.witnesses
            .iter()
            .chain(self.public_inputs.iter())
            .chain(self.constants.iter())
            .chain(self.selectors.iter())
            .map(Column::len)
            .max()
            .unwrap_or(0)
    }
}

//! Variables: immutable references to one cell of an assignment table.
//!
//! A variable is either bound to an absolute row of the table, or expressed
//! relatively to the "current row" of a gate. The second form only makes
//! sense inside gate constraints, where the same polynomial is instantiated
//! at every row the gate's selector is enabled.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

use crate::column::{ColumnKind, PRIVATE_STORAGE_SENTINEL};

/// Row addressing mode of a [Var].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowRef {
    /// An absolute row of the table.
    Absolute(usize),
    /// An offset from the row a gate is evaluated at. `0` is the current
    /// row, `1` the next one, `-1` the previous one.
    Relative(i32),
}

impl RowRef {
    /// Resolve the row against `current_row`.
    ///
    /// Absolute rows are returned unchanged. Returns `None` if a relative
    /// offset points before the first row.
    pub fn resolve(&self, current_row: usize) -> Option<usize> {
        match *self {
            RowRef::Absolute(row) => Some(row),
            RowRef::Relative(offset) => {
                let row = current_row as i64 + offset as i64;
                usize::try_from(row).ok()
            }
        }
    }
}

/// A reference to one cell: a column kind, a column index and a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Var {
    pub kind: ColumnKind,
    pub index: usize,
    pub row: RowRef,
}

impl Var {
    pub fn new(kind: ColumnKind, index: usize, row: RowRef) -> Self {
        Self { kind, index, row }
    }

    /// Absolute witness cell.
    pub fn witness(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::Witness, index, RowRef::Absolute(row))
    }

    /// Absolute public input cell.
    pub fn public_input(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::PublicInput, index, RowRef::Absolute(row))
    }

    /// Absolute constant cell.
    pub fn constant(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::Constant, index, RowRef::Absolute(row))
    }

    /// Absolute selector cell.
    pub fn selector(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::Selector, index, RowRef::Absolute(row))
    }

    /// Witness cell relative to the current row of a gate.
    pub fn witness_rel(index: usize, offset: i32) -> Self {
        Self::new(ColumnKind::Witness, index, RowRef::Relative(offset))
    }

    /// Constant cell relative to the current row of a gate.
    pub fn constant_rel(index: usize, offset: i32) -> Self {
        Self::new(ColumnKind::Constant, index, RowRef::Relative(offset))
    }

    /// A slot of the private storage.
    pub fn private_storage(slot: usize) -> Self {
        Self::new(
            ColumnKind::PrivateStorage,
            PRIVATE_STORAGE_SENTINEL,
            RowRef::Absolute(slot),
        )
    }

    /// A cell of the shared columns filled by an earlier stage.
    ///
    /// Shared columns are addressed through the public input family with
    /// the column index shifted by one: public input column `0` is the
    /// table's own public input, index `i + 1` names shared column `i`.
    pub fn shared(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::PublicInput, index + 1, RowRef::Absolute(row))
    }

    pub fn is_relative(&self) -> bool {
        matches!(self.row, RowRef::Relative(_))
    }

    /// True for both encodings of a private-storage slot: the dedicated
    /// kind, and a public input variable carrying the sentinel index.
    pub fn is_private_storage(&self) -> bool {
        match self.kind {
            ColumnKind::PrivateStorage => true,
            ColumnKind::PublicInput => self.index == PRIVATE_STORAGE_SENTINEL,
            _ => false,
        }
    }

    /// True for public input variables that name a shared column.
    pub fn is_shared(&self) -> bool {
        self.kind == ColumnKind::PublicInput && self.index > 0 && !self.is_private_storage()
    }

    /// Bind a relative variable to `current_row`.
    ///
    /// Panics if the offset points before row zero.
    pub fn at_row(&self, current_row: usize) -> Self {
        match self.row.resolve(current_row) {
            Some(row) => Self::new(self.kind, self.index, RowRef::Absolute(row)),
            None => panic!(
                "variable {self} points before the first row when evaluated at row {current_row}"
            ),
        }
    }

    /// Absolute row of the variable. Panics on relative variables.
    pub fn absolute_row(&self) -> usize {
        match self.row {
            RowRef::Absolute(row) => row,
            RowRef::Relative(offset) => {
                panic!("variable {self} is relative (offset {offset}) where an absolute row is required")
            }
        }
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter) -> Result {
        if self.is_private_storage() {
            return match self.row {
                RowRef::Absolute(slot) => write!(f, "ps[{slot}]"),
                RowRef::Relative(offset) => write!(f, "ps[{offset:+}]"),
            };
        }
        if self.is_shared() {
            write!(f, "sh[{}]", self.index - 1)?;
        } else {
            write!(f, "{}[{}]", self.kind.prefix(), self.index)?;
        }
        match self.row {
            RowRef::Absolute(row) => write!(f, "#{row}"),
            RowRef::Relative(0) => Ok(()),
            RowRef::Relative(offset) => write!(f, "@{offset:+}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_resolution() {
        assert_eq!(RowRef::Relative(1).resolve(4), Some(5));
        assert_eq!(RowRef::Relative(-1).resolve(4), Some(3));
        assert_eq!(RowRef::Relative(-1).resolve(0), None);
        assert_eq!(RowRef::Absolute(7).resolve(4), Some(7));
    }

    #[test]
    fn test_at_row_binds_relative_variables() {
        let v = Var::witness_rel(2, -1);
        assert_eq!(v.at_row(10), Var::witness(2, 9));
        let abs = Var::constant(0, 3);
        assert_eq!(abs.at_row(10), abs);
    }

    #[test]
    #[should_panic]
    fn test_at_row_before_first_row_panics() {
        Var::witness_rel(0, -2).at_row(1);
    }

    #[test]
    fn test_private_storage_encodings() {
        let dedicated = Var::private_storage(3);
        assert!(dedicated.is_private_storage());
        let sentinel = Var::new(
            ColumnKind::PublicInput,
            PRIVATE_STORAGE_SENTINEL,
            RowRef::Absolute(3),
        );
        assert!(sentinel.is_private_storage());
        assert!(!sentinel.is_shared());
        assert!(!Var::public_input(0, 3).is_private_storage());
    }

    #[test]
    fn test_shared_is_shifted_public_input() {
        let v = Var::shared(0, 2);
        assert_eq!(v.kind, ColumnKind::PublicInput);
        assert_eq!(v.index, 1);
        assert!(v.is_shared());
        assert!(!Var::public_input(0, 2).is_shared());
    }

    #[test]
    fn test_display() {
        assert_eq!(Var::witness(1, 5).to_string(), "w[1]#5");
        assert_eq!(Var::witness_rel(1, 0).to_string(), "w[1]");
        assert_eq!(Var::witness_rel(1, 1).to_string(), "w[1]@+1");
        assert_eq!(Var::witness_rel(1, -1).to_string(), "w[1]@-1");
        assert_eq!(Var::private_storage(4).to_string(), "ps[4]");
        assert_eq!(Var::shared(2, 0).to_string(), "sh[2]#0");
    }
}

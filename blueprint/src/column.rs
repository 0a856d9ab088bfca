//! The column families of an assignment table.

use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter};

/// Reserved column index marking a variable that names a private-storage
/// slot instead of a table cell. The slot number is carried by the row.
pub const PRIVATE_STORAGE_SENTINEL: usize = usize::MAX;

/// The kind of cell a [crate::var::Var] refers to.
///
/// Witness, public input, constant and selector columns are the four
/// families a prover sees. Private storage is unindexed scratch space that
/// never reaches the prover; it only holds intermediate values a gadget
/// wants to pass around as variables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumCountMacro,
    EnumIter,
)]
pub enum ColumnKind {
    Witness,
    PublicInput,
    Constant,
    Selector,
    PrivateStorage,
}

impl ColumnKind {
    /// Short prefix used when printing cells, e.g. `w[3]`.
    pub fn prefix(&self) -> &'static str {
        match self {
            ColumnKind::Witness => "w",
            ColumnKind::PublicInput => "pi",
            ColumnKind::Constant => "c",
            ColumnKind::Selector => "q",
            ColumnKind::PrivateStorage => "ps",
        }
    }

    /// Whether the family is part of the table handed to the prover.
    pub fn is_table_column(&self) -> bool {
        !matches!(self, ColumnKind::PrivateStorage)
    }
}

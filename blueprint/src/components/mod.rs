//! Reference gadgets built on the component protocol.
//!
//! They are deliberately small: each one exercises a different part of the
//! protocol.
//! - [addition::Addition] and [multiplication::Multiplication]: one gate on
//!   one row.
//! - [sum::Sum]: two gate shapes on consecutive rows, the second one
//!   reading the previous row, hence a block of two selectors.
//! - [add_constant::AddConstant]: a gate reading the constant column, whose
//!   mode is a structural parameter of the selector identity.
//! - [multiply_add::MultiplyAdd]: a parent gadget chaining two children.

use crate::var::Var;

pub mod add_constant;
pub mod addition;
pub mod multiplication;
pub mod multiply_add;
pub mod sum;

pub use add_constant::{AddConstant, ConstantMode};
pub use addition::Addition;
pub use multiplication::Multiplication;
pub use multiply_add::MultiplyAdd;
pub use sum::Sum;

/// Two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryInput {
    pub x: Var,
    pub y: Var,
}

/// A single result cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarOutput {
    pub output: Var,
}

/// Witness column counts the reference gadgets accept.
pub const MIN_WITNESS_AMOUNT: usize = 3;
pub const MAX_WITNESS_AMOUNT: usize = 15;

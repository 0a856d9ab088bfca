//! This module implements the error types of the crate.
//!
//! Only conditions a caller can act upon are errors. Reading a cell that was
//! never written, or a column index beyond a family's declared count, is a
//! bug in the calling gadget and panics instead.

use thiserror::Error;

use crate::var::Var;

/// Errors raised while negotiating column counts between gadgets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("the gadget {0} does not accept {1} witness columns")]
    WitnessAmountRejected(&'static str, usize),

    #[error("the gadget {0} requires {1} constant columns, got {2}")]
    NotEnoughConstants(&'static str, usize, usize),

    #[error("the gadget {0} requires {1} public input columns, got {2}")]
    NotEnoughPublicInputs(&'static str, usize, usize),

    #[error("the gadget {0} does not support this configuration: {1}")]
    UnsupportedParameter(&'static str, String),

    #[error("the merged manifest accepts no witness column count")]
    Unsatisfiable,
}

/// Errors raised while loading a table description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("the table description could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("the table description is invalid: {0}")]
    Invalid(&'static str),
}

/// Errors reported by the satisfiability checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SatisfiabilityError {
    #[error("constraint {constraint} of the gate with selector {selector} does not vanish at row {row}: {expression}")]
    GateNotSatisfied {
        selector: usize,
        constraint: usize,
        row: usize,
        expression: String,
    },

    #[error("constraint {constraint} of the gate with selector {selector} reads a cell outside of the table at row {row}")]
    GateOutOfTable {
        selector: usize,
        constraint: usize,
        row: usize,
    },

    #[error("the copy constraint {0} == {1} is not satisfied")]
    CopyConstraintViolated(Var, Var),

    #[error("the copy constraint {0} == {1} refers to a cell outside of the table")]
    CopyConstraintOutOfTable(Var, Var),
}

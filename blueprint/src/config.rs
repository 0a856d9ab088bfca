//! Declared shape of an assignment table.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of columns declared for each family of an assignment table.
///
/// The witness, public input, constant and shared counts are fixed for the
/// lifetime of the table. Selector columns are created on demand, as the
/// circuit builder hands out selector indices while gadgets register their
/// gates; `selector_columns` only pre-allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableDescription {
    pub witness_columns: usize,
    pub public_input_columns: usize,
    pub constant_columns: usize,
    #[serde(default)]
    pub selector_columns: usize,
    /// Columns handed over, read-only, by an earlier proving stage.
    #[serde(default)]
    pub shared_columns: usize,
}

impl TableDescription {
    pub fn new(
        witness_columns: usize,
        public_input_columns: usize,
        constant_columns: usize,
        selector_columns: usize,
    ) -> Self {
        Self {
            witness_columns,
            public_input_columns,
            constant_columns,
            selector_columns,
            shared_columns: 0,
        }
    }

    pub fn with_shared_columns(mut self, shared_columns: usize) -> Self {
        self.shared_columns = shared_columns;
        self
    }

    /// Parse a description from its JSON form, e.g.
    /// `{"witness_columns": 15, "public_input_columns": 1, "constant_columns": 1}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let desc: Self = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.witness_columns == 0 {
            return Err(ConfigError::Invalid("at least one witness column is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults_optional_families() {
        let desc = TableDescription::from_json(
            r#"{"witness_columns": 15, "public_input_columns": 1, "constant_columns": 2}"#,
        )
        .unwrap();
        assert_eq!(desc, TableDescription::new(15, 1, 2, 0));
        assert_eq!(desc.shared_columns, 0);
    }

    #[test]
    fn test_from_json_rejects_no_witness() {
        let err = TableDescription::from_json(
            r#"{"witness_columns": 0, "public_input_columns": 1, "constant_columns": 0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = TableDescription::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_shared_columns() {
        let desc = TableDescription::new(3, 1, 0, 2).with_shared_columns(4);
        let json = serde_json::to_string(&desc).unwrap();
        assert_eq!(TableDescription::from_json(&json).unwrap(), desc);
    }
}

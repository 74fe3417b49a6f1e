//! Table error types
//!
//! Every kind here is a caller-input error, surfaced immediately:
//! - SHEETDB_ARITY_MISMATCH: positional row width differs from the schema
//! - SHEETDB_MISSING_PRIMARY_KEY: a key column is absent or falsy
//! - SHEETDB_UNKNOWN_COLUMN: a search key or field names no column
//! - SHEETDB_SCHEMA_MISMATCH: a data file's header does not match the schema
//!
//! Zero matching rows is never an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::sheet::SheetError;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table errors
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Row has {actual} values but the schema declares {expected} columns")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("Primary key column '{column}' must be supplied with a non-empty value")]
    MissingPrimaryKey { column: String },

    #[error("Table '{table}' has no column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error(
        "Data file '{}' does not match schema '{schema}': expected columns {expected:?}, found {found:?}",
        .path.display()
    )]
    SchemaMismatch {
        path: PathBuf,
        schema: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

impl TableError {
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        TableError::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn missing_primary_key(column: impl Into<String>) -> Self {
        TableError::MissingPrimaryKey {
            column: column.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TableError::ArityMismatch { .. } => "SHEETDB_ARITY_MISMATCH",
            TableError::MissingPrimaryKey { .. } => "SHEETDB_MISSING_PRIMARY_KEY",
            TableError::UnknownColumn { .. } => "SHEETDB_UNKNOWN_COLUMN",
            TableError::SchemaMismatch { .. } => "SHEETDB_SCHEMA_MISMATCH",
            TableError::Sheet(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TableError::ArityMismatch { expected: 5, actual: 4 }.code(),
            "SHEETDB_ARITY_MISMATCH"
        );
        assert_eq!(
            TableError::missing_primary_key("id").code(),
            "SHEETDB_MISSING_PRIMARY_KEY"
        );
        assert_eq!(
            TableError::unknown_column("student", "major").code(),
            "SHEETDB_UNKNOWN_COLUMN"
        );
    }

    #[test]
    fn test_arity_display() {
        let display = TableError::ArityMismatch { expected: 5, actual: 4 }.to_string();
        assert!(display.contains('5'));
        assert!(display.contains('4'));
    }
}

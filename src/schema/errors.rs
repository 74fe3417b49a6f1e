//! Schema error types
//!
//! Error codes:
//! - SHEETDB_DUPLICATE_COLUMN
//! - SHEETDB_MALFORMED_SCHEMA
//! - sheet codec codes (SHEETDB_BAD_FILE_EXTENSION, SHEETDB_IO_ERROR, ...)

use std::path::PathBuf;

use thiserror::Error;

use crate::sheet::SheetError;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema errors
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A column name is already declared in the schema
    #[error("Column '{column}' already exists in schema '{schema}'")]
    DuplicateColumn { schema: String, column: String },

    /// A schema sheet decoded but its content is not a valid schema
    #[error("Malformed schema file '{}': {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

impl SchemaError {
    pub fn duplicate_column(schema: impl Into<String>, column: impl Into<String>) -> Self {
        SchemaError::DuplicateColumn {
            schema: schema.into(),
            column: column.into(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::DuplicateColumn { .. } => "SHEETDB_DUPLICATE_COLUMN",
            SchemaError::Malformed { .. } => "SHEETDB_MALFORMED_SCHEMA",
            SchemaError::Sheet(e) => e.code(),
        }
    }
}

//! # Sheet Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sheet operations
pub type SheetResult<T> = Result<T, SheetError>;

/// Sheet codec errors
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("File '{}' does not carry the .{expected} extension", .path.display())]
    BadFileExtension { path: PathBuf, expected: &'static str },

    #[error("Malformed sheet '{}': {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SheetError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SheetError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SheetError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::BadFileExtension { .. } => "SHEETDB_BAD_FILE_EXTENSION",
            SheetError::Malformed { .. } => "SHEETDB_MALFORMED_SHEET",
            SheetError::Io { .. } => "SHEETDB_IO_ERROR",
        }
    }
}

//! Sheet reading and writing

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SheetError, SheetResult};

/// Extension carried by every sheet file
pub const SHEET_EXTENSION: &str = "json";

/// Returns `<dir>/<name>.json`
pub fn sheet_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, SHEET_EXTENSION))
}

/// One sheet: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name, also the file stem
    pub sheet_name: String,
    /// Column headers in order
    pub header: Vec<String>,
    /// Data rows, each as wide as the header
    pub rows: Vec<Vec<Value>>,
}

impl Sheet {
    /// Creates an empty sheet with the given header
    pub fn new(sheet_name: impl Into<String>, header: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            header,
            rows: Vec::new(),
        }
    }

    /// Appends a data row. The caller keeps it as wide as the header.
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Writes the sheet to `<dir>/<sheet_name>.json`, creating `dir` if needed.
    ///
    /// The whole file is rewritten; a crash mid-write can leave it truncated.
    pub fn write(&self, dir: &Path) -> SheetResult<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| SheetError::io(dir, e))?;
        }

        let path = sheet_path(dir, &self.sheet_name);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::malformed(&path, format!("Failed to serialize: {}", e)))?;

        fs::write(&path, content).map_err(|e| SheetError::io(&path, e))?;
        Ok(path)
    }

    /// Reads a sheet back from `path`.
    ///
    /// # Errors
    ///
    /// - `BadFileExtension` if the path does not end in `.json`
    /// - `Io` if the file cannot be read
    /// - `Malformed` if the content does not decode or a row is not header-wide
    pub fn read(path: &Path) -> SheetResult<Self> {
        check_extension(path)?;

        let content = fs::read_to_string(path).map_err(|e| SheetError::io(path, e))?;
        let sheet: Sheet = serde_json::from_str(&content)
            .map_err(|e| SheetError::malformed(path, format!("Invalid JSON: {}", e)))?;

        for (idx, row) in sheet.rows.iter().enumerate() {
            if row.len() != sheet.header.len() {
                return Err(SheetError::malformed(
                    path,
                    format!(
                        "row {} has {} cells, header has {}",
                        idx,
                        row.len(),
                        sheet.header.len()
                    ),
                ));
            }
        }

        Ok(sheet)
    }

    /// Returns the case-sensitive file stem of a sheet path.
    pub fn stem(path: &Path) -> SheetResult<String> {
        check_extension(path)?;

        path.file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| SheetError::malformed(path, "file name has no usable stem"))
    }
}

fn check_extension(path: &Path) -> SheetResult<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext == SHEET_EXTENSION => Ok(()),
        _ => Err(SheetError::BadFileExtension {
            path: path.to_path_buf(),
            expected: SHEET_EXTENSION,
        }),
    }
}

//! Schema persistence
//!
//! - One sheet per schema at `<dir>/<schema name>.json`
//! - Header is exactly `name, datatype, primary_key, not_null, default_val`
//! - One row per column, in schema order
//! - On load the schema is named after the file stem (case-sensitive)

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnSpec, ColumnType, Schema};
use crate::observability::{log_event_with_fields, Event};
use crate::sheet::Sheet;

/// Header row of every schema sheet
pub const SCHEMA_HEADER: [&str; 5] = ["name", "datatype", "primary_key", "not_null", "default_val"];

impl Schema {
    /// Writes the schema to `<dir>/<name>.json` and returns the path.
    ///
    /// Creates `dir` if it does not exist. An existing file is overwritten.
    pub fn save(&self, dir: &Path) -> SchemaResult<PathBuf> {
        let mut sheet = Sheet::new(
            self.name(),
            SCHEMA_HEADER.iter().map(|h| h.to_string()).collect(),
        );

        for spec in self.columns() {
            sheet.push_row(vec![
                Value::from(spec.name()),
                Value::from(spec.datatype().type_name()),
                Value::Bool(spec.is_primary_key()),
                Value::Bool(spec.is_not_null()),
                spec.default_val().clone(),
            ]);
        }

        let path = sheet.write(dir)?;

        let columns = self.len().to_string();
        let path_str = path.display().to_string();
        log_event_with_fields(
            Event::SchemaSaved,
            &[("schema", self.name()), ("columns", columns.as_str()), ("path", path_str.as_str())],
        );

        Ok(path)
    }

    /// Reads a schema back from a file written by [`Schema::save`].
    ///
    /// # Errors
    ///
    /// - `BadFileExtension` if `path` does not end in `.json`
    /// - `Malformed` if the header or a cell does not describe a column
    /// - `DuplicateColumn` if two rows share a name
    pub fn load(path: &Path) -> SchemaResult<Schema> {
        let name = Sheet::stem(path)?;
        let sheet = Sheet::read(path)?;

        if sheet.header != SCHEMA_HEADER {
            return Err(SchemaError::malformed(
                path,
                format!(
                    "expected header {:?}, found {:?}",
                    SCHEMA_HEADER, sheet.header
                ),
            ));
        }

        let mut columns = Vec::with_capacity(sheet.rows.len());
        for (idx, row) in sheet.rows.into_iter().enumerate() {
            columns.push(decode_column(path, idx, row)?);
        }

        let schema = Schema::with_columns(name, columns)?;

        let columns = schema.len().to_string();
        let path_str = path.display().to_string();
        log_event_with_fields(
            Event::SchemaLoaded,
            &[("schema", schema.name()), ("columns", columns.as_str()), ("path", path_str.as_str())],
        );

        Ok(schema)
    }
}

fn decode_column(path: &Path, idx: usize, row: Vec<Value>) -> SchemaResult<ColumnSpec> {
    let [name, datatype, primary_key, not_null, default_val]: [Value; 5] = row
        .try_into()
        .map_err(|_| SchemaError::malformed(path, format!("row {} is not 5 cells wide", idx)))?;

    let name = match name {
        Value::String(s) if !s.is_empty() => s,
        other => {
            return Err(SchemaError::malformed(
                path,
                format!("row {}: column name must be a non-empty string, got {}", idx, other),
            ))
        }
    };

    let datatype: ColumnType = datatype
        .as_str()
        .ok_or_else(|| {
            SchemaError::malformed(path, format!("row {}: datatype must be a string", idx))
        })?
        .parse::<ColumnType>()
        .map_err(|e: String| SchemaError::malformed(path, format!("row {}: {}", idx, e)))?;

    let primary_key = decode_flag(path, idx, "primary_key", &primary_key)?;
    let not_null = decode_flag(path, idx, "not_null", &not_null)?;

    Ok(ColumnSpec::new(name, datatype, default_val, primary_key, not_null))
}

fn decode_flag(path: &Path, idx: usize, field: &str, value: &Value) -> SchemaResult<bool> {
    value.as_bool().ok_or_else(|| {
        SchemaError::malformed(
            path,
            format!("row {}: {} must be a boolean, got {}", idx, field, value),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn sample_schema() -> Schema {
        Schema::with_columns(
            "student",
            [
                ColumnSpec::new("id", ColumnType::Str, "", true, true),
                ColumnSpec::new("age", ColumnType::Int, 0, false, false),
                ColumnSpec::nullable("gender", ColumnType::Str),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let schema = sample_schema();

        let path = schema.save(temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join("student.json"));

        let loaded = Schema::load(&path).unwrap();
        assert_eq!(loaded, schema);
    }

    #[test]
    fn test_save_writes_expected_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = sample_schema().save(temp_dir.path()).unwrap();

        let sheet = Sheet::read(&path).unwrap();
        assert_eq!(sheet.header, SCHEMA_HEADER);
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[1], vec![json!("age"), json!("int"), json!(false), json!(false), json!(0)]);
    }

    #[test]
    fn test_load_names_schema_after_stem() {
        let temp_dir = TempDir::new().unwrap();
        let path = sample_schema().save(temp_dir.path()).unwrap();
        let renamed = temp_dir.path().join("Pupil.json");
        fs::rename(&path, &renamed).unwrap();

        let loaded = Schema::load(&renamed).unwrap();
        assert_eq!(loaded.name(), "Pupil");
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn test_load_rejects_bad_extension() {
        let err = Schema::load(Path::new("metaTable/student.xls")).unwrap_err();
        assert_eq!(err.code(), "SHEETDB_BAD_FILE_EXTENSION");
    }

    #[test]
    fn test_load_rejects_wrong_header() {
        let temp_dir = TempDir::new().unwrap();
        let mut sheet = Sheet::new("student", vec!["id".into(), "name".into()]);
        sheet.push_row(vec![json!("S1"), json!("Wangfeng")]);
        let path = sheet.write(temp_dir.path()).unwrap();

        let err = Schema::load(&path).unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_type_tag() {
        let temp_dir = TempDir::new().unwrap();
        let mut sheet = Sheet::new(
            "student",
            SCHEMA_HEADER.iter().map(|h| h.to_string()).collect(),
        );
        sheet.push_row(vec![json!("born"), json!("date"), json!(false), json!(false), Value::Null]);
        let path = sheet.write(temp_dir.path()).unwrap();

        let err = Schema::load(&path).unwrap_err();
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_load_rejects_duplicate_names() {
        let temp_dir = TempDir::new().unwrap();
        let mut sheet = Sheet::new(
            "student",
            SCHEMA_HEADER.iter().map(|h| h.to_string()).collect(),
        );
        for _ in 0..2 {
            sheet.push_row(vec![json!("id"), json!("str"), json!(true), json!(true), json!("")]);
        }
        let path = sheet.write(temp_dir.path()).unwrap();

        let err = Schema::load(&path).unwrap_err();
        assert_eq!(err.code(), "SHEETDB_DUPLICATE_COLUMN");
    }

    #[test]
    fn test_save_empty_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = Schema::new("empty").save(temp_dir.path()).unwrap();

        let loaded = Schema::load(&path).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.name(), "empty");
    }
}

//! Table persistence
//!
//! - One sheet per table at `<dir>/<schema name>.json`
//! - Header is the schema's column names in order
//! - The schema itself is not stored; loading needs it supplied
//! - Loading checks the header against the supplied schema

use std::path::{Path, PathBuf};

use super::errors::{TableError, TableResult};
use super::row::Row;
use super::table::Table;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::Schema;
use crate::sheet::Sheet;

impl<'s> Table<'s> {
    /// Writes the rows to `<dir>/<schema name>.json` and returns the path.
    pub fn save(&self, dir: &Path) -> TableResult<PathBuf> {
        let schema = self.schema();
        let mut sheet = Sheet::new(
            schema.name(),
            schema.column_names().into_iter().map(str::to_string).collect(),
        );

        for row in self.rows() {
            sheet.push_row(row.values().cloned().collect());
        }

        let path = sheet.write(dir)?;

        let rows = self.len().to_string();
        let path_str = path.display().to_string();
        log_event_with_fields(
            Event::TableSaved,
            &[("table", schema.name()), ("rows", rows.as_str()), ("path", path_str.as_str())],
        );

        Ok(path)
    }

    /// Reads rows from `path` and binds them to `schema`.
    ///
    /// Rows are restored as stored; defaults are not re-applied.
    ///
    /// # Errors
    ///
    /// - `BadFileExtension` if `path` does not end in `.json`
    /// - `SchemaMismatch` if the file's header differs from the schema's columns
    pub fn load(path: &Path, schema: &'s Schema) -> TableResult<Table<'s>> {
        let sheet = Sheet::read(path)?;

        let expected = schema.column_names();
        if sheet.header != expected {
            return Err(TableError::SchemaMismatch {
                path: path.to_path_buf(),
                schema: schema.name().to_string(),
                expected: expected.into_iter().map(str::to_string).collect(),
                found: sheet.header,
            });
        }

        let rows = sheet
            .rows
            .into_iter()
            .map(|values| {
                Row::from_fields(sheet.header.iter().cloned().zip(values).collect())
            })
            .collect();
        let table = Table::from_rows(schema, rows);

        let rows = table.len().to_string();
        let path_str = path.display().to_string();
        log_event_with_fields(
            Event::TableLoaded,
            &[("table", schema.name()), ("rows", rows.as_str()), ("path", path_str.as_str())],
        );

        Ok(table)
    }
}

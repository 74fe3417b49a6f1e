//! Ordered row store bound to a schema

use serde_json::Value;

use super::builder::RowBuilder;
use super::errors::{TableError, TableResult};
use super::row::{Row, RowData};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::Schema;

/// An ordered collection of rows conforming to one schema.
///
/// The table borrows its schema; several tables may share one. Every row
/// inserted or updated goes through [`RowBuilder`].
#[derive(Debug, Clone)]
pub struct Table<'s> {
    schema: &'s Schema,
    rows: Vec<Row>,
}

impl<'s> Table<'s> {
    /// Creates an empty table.
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Creates a table from initial row data, building every row.
    pub fn with_rows<I, D>(schema: &'s Schema, data: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<RowData>,
    {
        let builder = RowBuilder::new(schema);
        let rows = data
            .into_iter()
            .map(|d| builder.build(d))
            .collect::<TableResult<Vec<_>>>()?;

        Ok(Self { schema, rows })
    }

    pub(crate) fn from_rows(schema: &'s Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Builds a row from `data` and appends it as the last row.
    pub fn append(&mut self, data: impl Into<RowData>) -> TableResult<()> {
        let row = RowBuilder::new(self.schema).build(data)?;
        self.rows.push(row);
        Ok(())
    }

    /// Deletes every row whose `key` column equals `value`.
    ///
    /// Returns the number of rows removed; zero matches is not an error.
    pub fn remove(&mut self, key: &str, value: &Value) -> TableResult<usize> {
        self.check_column(key)?;

        let before = self.rows.len();
        self.rows.retain(|row| !row.matches(key, value));
        let removed = before - self.rows.len();

        let count = removed.to_string();
        log_event_with_fields(
            Event::RowsRemoved,
            &[("table", self.schema.name()), ("key", key), ("count", count.as_str())],
        );
        Ok(removed)
    }

    /// Overwrites every row whose `key` column equals `value` with a row
    /// built from `data`. All matches receive identical values.
    ///
    /// Returns the number of rows overwritten.
    pub fn update(
        &mut self,
        key: &str,
        value: &Value,
        data: impl Into<RowData>,
    ) -> TableResult<usize> {
        self.check_column(key)?;
        let new_row = RowBuilder::new(self.schema).build(data)?;

        let mut updated = 0;
        for row in self.rows.iter_mut().filter(|row| row.matches(key, value)) {
            *row = new_row.clone();
            updated += 1;
        }

        let count = updated.to_string();
        log_event_with_fields(
            Event::RowsUpdated,
            &[("table", self.schema.name()), ("key", key), ("count", count.as_str())],
        );
        Ok(updated)
    }

    /// Returns the rows whose `key` column equals `value`, in table order.
    pub fn find(&self, key: &str, value: &Value) -> TableResult<Vec<&Row>> {
        self.check_column(key)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| row.matches(key, value))
            .collect())
    }

    /// Lists `(row index, column)` pairs whose value does not have the
    /// column's declared type. Values are stored regardless.
    pub fn type_violations(&self) -> Vec<(usize, &'s str)> {
        let mut violations = Vec::new();
        for (idx, row) in self.rows.iter().enumerate() {
            for spec in self.schema.columns() {
                let admitted = row
                    .get(spec.name())
                    .map_or(true, |v| spec.datatype().admits(v));
                if !admitted {
                    violations.push((idx, spec.name()));
                }
            }
        }
        violations
    }

    fn check_column(&self, key: &str) -> TableResult<()> {
        if self.schema.position(key).is_none() {
            return Err(TableError::unknown_column(self.schema.name(), key));
        }
        Ok(())
    }
}

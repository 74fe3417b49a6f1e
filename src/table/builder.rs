//! Row builder: materializes a row from caller input against a schema
//!
//! Positional input:
//! - Length must equal the column count (ArityMismatch otherwise)
//! - Values map to columns in schema order
//! - A null primary-key value is rejected (MissingPrimaryKey)
//!
//! Field-map input, partial or complete:
//! - Keys that name no column are rejected (UnknownColumn)
//! - Primary-key columns must be present and truthy (MissingPrimaryKey)
//! - Absent columns take `default_val` when not-null, else null
//!
//! For both kinds an explicit null in a not-null, non-key column takes
//! `default_val`. Primary keys are never defaulted.

use serde_json::{Map, Value};

use super::errors::{TableError, TableResult};
use super::row::{Row, RowData};
use crate::schema::{ColumnSpec, Schema};

/// Builds rows consistent with one schema. Does not mutate its input schema.
pub struct RowBuilder<'s> {
    schema: &'s Schema,
}

impl<'s> RowBuilder<'s> {
    /// Creates a builder for rows of `schema`.
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Builds a full row from `data`.
    ///
    /// # Errors
    ///
    /// - `ArityMismatch` if positional data is not exactly one value per column
    /// - `UnknownColumn` if a field map names a column the schema lacks
    /// - `MissingPrimaryKey` if a field map omits a key column or gives it a falsy value,
    ///   or positional data holds null in a key column
    pub fn build(&self, data: impl Into<RowData>) -> TableResult<Row> {
        match data.into() {
            RowData::Positional(values) => self.build_positional(values),
            RowData::Fields(fields) => self.build_fields(fields),
        }
    }

    fn build_positional(&self, values: Vec<Value>) -> TableResult<Row> {
        if values.len() != self.schema.len() {
            return Err(TableError::ArityMismatch {
                expected: self.schema.len(),
                actual: values.len(),
            });
        }

        let mut row = Vec::with_capacity(values.len());
        for (spec, value) in self.schema.columns().iter().zip(values) {
            if spec.is_primary_key() && value.is_null() {
                return Err(TableError::missing_primary_key(spec.name()));
            }
            row.push((spec.name().to_string(), fill_null(spec, value)));
        }

        Ok(Row::from_fields(row))
    }

    fn build_fields(&self, mut fields: Map<String, Value>) -> TableResult<Row> {
        // Reject undeclared fields before filling anything
        for key in fields.keys() {
            if self.schema.position(key).is_none() {
                return Err(TableError::unknown_column(self.schema.name(), key));
            }
        }

        let mut row = Vec::with_capacity(self.schema.len());
        for spec in self.schema.columns() {
            let value = fields.remove(spec.name()).unwrap_or(Value::Null);

            if spec.is_primary_key() && is_falsy(&value) {
                return Err(TableError::missing_primary_key(spec.name()));
            }

            row.push((spec.name().to_string(), fill_null(spec, value)));
        }

        Ok(Row::from_fields(row))
    }
}

fn fill_null(spec: &ColumnSpec, value: Value) -> Value {
    if value.is_null() && spec.is_not_null() {
        spec.default_val().clone()
    } else {
        value
    }
}

/// Null, false, zero, and empty strings or containers are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

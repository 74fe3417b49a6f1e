//! Rows and row input

use serde_json::{Map, Value};

/// One schema-conforming record: a value per column, in schema order.
///
/// A row has no identity of its own beyond its position in a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub(crate) fn from_fields(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Value of column `column`, if the row has it
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// `(column, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Values in schema order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The row as a JSON object keyed by column name
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Value::Object(map)
    }

    /// Numbers compare by value, so `19` matches `19.0`.
    pub(crate) fn matches(&self, column: &str, value: &Value) -> bool {
        self.get(column).map_or(false, |cell| cell_eq(cell, value))
    }
}

fn cell_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                // one negative i64, one u64 above i64::MAX
                false
            }
        }
        _ => a == b,
    }
}

/// Caller-supplied data for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowData {
    /// One value per column, in schema order
    Positional(Vec<Value>),
    /// Values keyed by column name; may be partial
    Fields(Map<String, Value>),
}

impl From<Vec<Value>> for RowData {
    fn from(values: Vec<Value>) -> Self {
        RowData::Positional(values)
    }
}

impl From<Map<String, Value>> for RowData {
    fn from(fields: Map<String, Value>) -> Self {
        RowData::Fields(fields)
    }
}

/// Arrays become positional rows and objects become field maps.
/// Any other value is a one-element positional row.
impl From<Value> for RowData {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => RowData::Positional(values),
            Value::Object(fields) => RowData::Fields(fields),
            other => RowData::Positional(vec![other]),
        }
    }
}

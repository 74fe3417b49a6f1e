//! Schema type definitions
//!
//! Supported column types:
//! - str: UTF-8 string
//! - int: 64-bit integer
//! - float: 64-bit floating point
//! - bool: Boolean
//!
//! The type tag documents a column. Values are never coerced to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use crate::observability::{log_event_with_fields, Event};

/// Declared primitive kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// UTF-8 string
    Str,
    /// 64-bit integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
}

impl ColumnType {
    /// Returns the type tag as written to schema files
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Str => "str",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
        }
    }

    /// Whether `value` has this primitive kind. Null is admitted by every kind.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (ColumnType::Str, Value::String(_)) => true,
            (ColumnType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (ColumnType::Float, Value::Number(_)) => true,
            (ColumnType::Bool, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" => Ok(ColumnType::Str),
            "int" => Ok(ColumnType::Int),
            "float" => Ok(ColumnType::Float),
            "bool" => Ok(ColumnType::Bool),
            other => Err(format!(
                "unknown column type '{}', expected str, int, float or bool",
                other
            )),
        }
    }
}

/// Description of one column. Immutable once built; a schema update
/// replaces the whole spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    name: String,
    datatype: ColumnType,
    primary_key: bool,
    not_null: bool,
    default_val: Value,
}

impl ColumnSpec {
    /// Create a column spec from all five fields
    pub fn new(
        name: impl Into<String>,
        datatype: ColumnType,
        default_val: impl Into<Value>,
        primary_key: bool,
        not_null: bool,
    ) -> Self {
        Self {
            name: name.into(),
            datatype,
            primary_key,
            not_null,
            default_val: default_val.into(),
        }
    }

    /// Create a primary-key, not-null column with no default
    pub fn primary(name: impl Into<String>, datatype: ColumnType) -> Self {
        Self::new(name, datatype, Value::Null, true, true)
    }

    /// Create a nullable, non-key column with no default
    pub fn nullable(name: impl Into<String>, datatype: ColumnType) -> Self {
        Self::new(name, datatype, Value::Null, false, false)
    }

    /// Returns a copy carrying `default_val` as its default
    pub fn with_default(self, default_val: impl Into<Value>) -> Self {
        Self {
            default_val: default_val.into(),
            ..self
        }
    }

    /// Returns a copy with the not-null flag set to `not_null`
    pub fn with_not_null(self, not_null: bool) -> Self {
        Self { not_null, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> ColumnType {
        self.datatype
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    /// Value used when a not-null column is not supplied
    pub fn default_val(&self) -> &Value {
        &self.default_val
    }
}

/// Ordered column declarations for one named table.
///
/// Column order defines the positional mapping of rows supplied as tuples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    name: String,
    columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Create a schema from columns in order, rejecting duplicate names
    pub fn with_columns(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = ColumnSpec>,
    ) -> SchemaResult<Self> {
        let mut schema = Self::new(name);
        for spec in columns {
            schema.push_unique(spec)?;
        }
        Ok(schema)
    }

    /// Table identifier, also the stem of the schema and data files
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in schema order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the column named `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Primary-key columns in schema order
    pub fn primary_keys(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.is_primary_key())
    }

    /// Appends `spec` as the last column.
    ///
    /// # Errors
    ///
    /// `DuplicateColumn` if a column with the same name exists.
    pub fn append(&mut self, spec: ColumnSpec) -> SchemaResult<()> {
        let column = spec.name().to_string();
        self.push_unique(spec)?;
        log_event_with_fields(
            Event::ColumnAppended,
            &[("schema", self.name.as_str()), ("column", column.as_str())],
        );
        Ok(())
    }

    /// Removes the column named `name`. Returns `None` when nothing matched.
    pub fn remove(&mut self, name: &str) -> Option<ColumnSpec> {
        let idx = self.position(name)?;
        let removed = self.columns.remove(idx);
        log_event_with_fields(
            Event::ColumnRemoved,
            &[("schema", self.name.as_str()), ("column", name)],
        );
        Some(removed)
    }

    /// Replaces the column named `name` in place with `spec`.
    ///
    /// The new spec's own name becomes the column's name. Returns `false`
    /// when no column matched.
    ///
    /// # Errors
    ///
    /// `DuplicateColumn` if the new name belongs to a different column.
    pub fn update(&mut self, name: &str, spec: ColumnSpec) -> SchemaResult<bool> {
        let Some(idx) = self.position(name) else {
            return Ok(false);
        };

        if let Some(other) = self.position(spec.name()) {
            if other != idx {
                return Err(SchemaError::duplicate_column(&self.name, spec.name()));
            }
        }

        log_event_with_fields(
            Event::ColumnUpdated,
            &[("schema", self.name.as_str()), ("column", name), ("new_name", spec.name())],
        );
        self.columns[idx] = spec;
        Ok(true)
    }

    /// Returns the column named `name`, if any
    pub fn find(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name() == name)
    }

    fn push_unique(&mut self, spec: ColumnSpec) -> SchemaResult<()> {
        if self.position(spec.name()).is_some() {
            return Err(SchemaError::duplicate_column(&self.name, spec.name()));
        }
        self.columns.push(spec);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student_schema() -> Schema {
        Schema::with_columns(
            "student",
            [
                ColumnSpec::new("id", ColumnType::Str, "", true, true),
                ColumnSpec::new("name", ColumnType::Str, "", false, false),
                ColumnSpec::new("dept", ColumnType::Str, "", false, false),
                ColumnSpec::new("age", ColumnType::Int, 0, false, false),
                ColumnSpec::new("gender", ColumnType::Str, "", false, false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column_order_preserved() {
        let schema = student_schema();
        assert_eq!(
            schema.column_names(),
            vec!["id", "name", "dept", "age", "gender"]
        );
        assert_eq!(schema.position("age"), Some(3));
    }

    #[test]
    fn test_append_adds_trailing_column() {
        let mut schema = student_schema();
        schema
            .append(ColumnSpec::new("test", ColumnType::Int, 0, false, false))
            .unwrap();

        assert_eq!(schema.len(), 6);
        assert_eq!(schema.columns()[5].name(), "test");
    }

    #[test]
    fn test_append_rejects_duplicate() {
        let mut schema = student_schema();
        let err = schema
            .append(ColumnSpec::nullable("age", ColumnType::Int))
            .unwrap_err();

        assert!(matches!(err, SchemaError::DuplicateColumn { .. }));
        assert_eq!(schema.len(), 5);
    }

    #[test]
    fn test_with_columns_rejects_duplicate() {
        let result = Schema::with_columns(
            "t",
            [
                ColumnSpec::primary("id", ColumnType::Str),
                ColumnSpec::nullable("id", ColumnType::Int),
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut schema = student_schema();
        assert!(schema.remove("nope").is_none());
        assert_eq!(schema.len(), 5);
    }

    #[test]
    fn test_remove_existing() {
        let mut schema = student_schema();
        let removed = schema.remove("age").unwrap();

        assert_eq!(removed.datatype(), ColumnType::Int);
        assert!(schema.find("age").is_none());
        assert_eq!(schema.column_names(), vec!["id", "name", "dept", "gender"]);
    }

    #[test]
    fn test_update_renames_in_place() {
        let mut schema = student_schema();
        let replaced = schema
            .update("dept", ColumnSpec::new("major", ColumnType::Str, "none", false, true))
            .unwrap();

        assert!(replaced);
        assert!(schema.find("dept").is_none());
        let major = schema.find("major").unwrap();
        assert!(major.is_not_null());
        assert_eq!(major.default_val(), &json!("none"));
        assert_eq!(schema.position("major"), Some(2));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut schema = student_schema();
        let replaced = schema
            .update("nope", ColumnSpec::nullable("x", ColumnType::Str))
            .unwrap();

        assert!(!replaced);
        assert!(schema.find("x").is_none());
    }

    #[test]
    fn test_update_rejects_collision_with_other_column() {
        let mut schema = student_schema();
        let err = schema
            .update("dept", ColumnSpec::nullable("name", ColumnType::Str))
            .unwrap_err();

        assert!(matches!(err, SchemaError::DuplicateColumn { .. }));
        assert!(schema.find("dept").is_some());
    }

    #[test]
    fn test_update_same_name_allowed() {
        let mut schema = student_schema();
        assert!(schema
            .update("age", ColumnSpec::new("age", ColumnType::Int, 18, false, true))
            .unwrap());
        assert_eq!(schema.find("age").unwrap().default_val(), &json!(18));
    }

    #[test]
    fn test_primary_keys() {
        let schema = student_schema();
        let keys: Vec<&str> = schema.primary_keys().map(|c| c.name()).collect();
        assert_eq!(keys, vec!["id"]);
    }

    #[test]
    fn test_column_type_admits() {
        assert!(ColumnType::Int.admits(&json!(20)));
        assert!(!ColumnType::Int.admits(&json!(20.5)));
        assert!(ColumnType::Float.admits(&json!(20)));
        assert!(ColumnType::Str.admits(&Value::Null));
        assert!(!ColumnType::Bool.admits(&json!("true")));
    }

    #[test]
    fn test_column_type_tags() {
        for ty in [ColumnType::Str, ColumnType::Int, ColumnType::Float, ColumnType::Bool] {
            assert_eq!(ty.type_name().parse::<ColumnType>().unwrap(), ty);
        }
        assert!("date".parse::<ColumnType>().is_err());
    }
}

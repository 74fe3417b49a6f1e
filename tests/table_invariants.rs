//! Table Invariant Tests
//!
//! - Every row carries exactly the schema's columns
//! - Primary keys are never defaulted
//! - Positional rows must match the column count
//! - Zero matches is success; an unknown column is an error

use sheetdb::schema::{ColumnSpec, ColumnType, Schema};
use sheetdb::table::{Row, RowBuilder, Table, TableError};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

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

fn roster() -> Vec<Value> {
    vec![
        json!(["S1", "Wangfeng", "Physics", 20, "M"]),
        json!(["S2", "Liu fang", "Physics", 19, "M"]),
        json!(["S3", "Chen yun", "CS", 22, "M"]),
        json!(["S4", "Wu kai", "Finance", 19, "M"]),
        json!(["S5", "Liu li", "CS", 21, "F"]),
        json!(["S6", "Dongqing", "Finance", 18, "F"]),
        json!(["S7", "Li", "CS", 19, "F"]),
        json!(["S8", "Chen", "CS", 21, "F"]),
        json!(["S9", "Zhang", "Physics", 19, "M"]),
        json!(["S10", "Yang", "CS", 22, "F"]),
    ]
}

fn ids(rows: &[Row]) -> Vec<&str> {
    rows.iter()
        .map(|r| r.get("id").and_then(Value::as_str).unwrap())
        .collect()
}

// =============================================================================
// Row Builder Tests
// =============================================================================

/// A positional tuple maps onto columns in schema order.
#[test]
fn test_positional_row_materialized() {
    let schema = student_schema();
    let row = RowBuilder::new(&schema)
        .build(json!(["S1", "Wangfeng", "Physics", 20, "M"]))
        .unwrap();

    assert_eq!(
        row.to_json(),
        json!({"id": "S1", "name": "Wangfeng", "dept": "Physics", "age": 20, "gender": "M"})
    );
}

/// Every row's column set equals the schema's.
#[test]
fn test_row_columns_equal_schema() {
    let schema = student_schema();
    let table = Table::with_rows(
        &schema,
        vec![json!(["S1", "a", "b", 1, "M"]), json!({"id": "S2"})],
    )
    .unwrap();

    for row in table.rows() {
        let names: Vec<&str> = row.iter().map(|(n, _)| n).collect();
        assert_eq!(names, schema.column_names());
    }
}

/// Wrong tuple length fails for every length but the right one.
#[test]
fn test_arity_mismatch() {
    let schema = student_schema();
    let builder = RowBuilder::new(&schema);

    for len in [0usize, 1, 4, 6] {
        let values = vec![json!("S1"); len];
        let err = builder.build(values).unwrap_err();
        assert!(matches!(
            err,
            TableError::ArityMismatch { expected: 5, actual } if actual == len
        ));
    }
}

/// A partial mapping without the key column fails.
#[test]
fn test_missing_primary_key() {
    let schema = student_schema();
    let err = RowBuilder::new(&schema)
        .build(json!({"name": "Wangfeng", "dept": "Physics"}))
        .unwrap_err();

    assert_eq!(err.code(), "SHEETDB_MISSING_PRIMARY_KEY");
}

/// Defaults apply only to not-null columns.
#[test]
fn test_defaults_fill_not_null_only() {
    let schema = Schema::with_columns(
        "t",
        [
            ColumnSpec::primary("id", ColumnType::Str),
            ColumnSpec::new("age", ColumnType::Int, 0, false, false),
            ColumnSpec::new("level", ColumnType::Int, 1, false, true),
        ],
    )
    .unwrap();

    let row = RowBuilder::new(&schema).build(json!({"id": "S1"})).unwrap();

    assert_eq!(row.get("age"), Some(&Value::Null));
    assert_eq!(row.get("level"), Some(&json!(1)));
}

// =============================================================================
// Table Operation Tests
// =============================================================================

/// Removing dept CS leaves the others in their original relative order.
#[test]
fn test_remove_by_dept() {
    let schema = student_schema();
    let mut table = Table::with_rows(&schema, roster()).unwrap();

    let removed = table.remove("dept", &json!("CS")).unwrap();

    assert_eq!(removed, 5);
    assert_eq!(ids(table.rows()), vec!["S1", "S2", "S4", "S6", "S9"]);
    assert!(table.find("dept", &json!("CS")).unwrap().is_empty());
}

/// A value absent from a column: find is empty and remove changes nothing.
#[test]
fn test_absent_value_is_noop() {
    let schema = student_schema();
    let mut table = Table::with_rows(&schema, roster()).unwrap();
    let before = table.rows().to_vec();

    for value in [json!("S99"), json!(19), Value::Null] {
        assert!(table.find("id", &value).unwrap().is_empty());
        assert_eq!(table.remove("id", &value).unwrap(), 0);
    }

    assert_eq!(table.rows(), before.as_slice());
}

/// Unknown columns fail for find, remove and update.
#[test]
fn test_unknown_column_errors() {
    let schema = student_schema();
    let mut table = Table::with_rows(&schema, roster()).unwrap();

    assert!(matches!(
        table.find("major", &json!("CS")),
        Err(TableError::UnknownColumn { .. })
    ));
    assert!(matches!(
        table.remove("major", &json!("CS")),
        Err(TableError::UnknownColumn { .. })
    ));
    assert!(matches!(
        table.update("major", &json!("CS"), json!({"id": "S1"})),
        Err(TableError::UnknownColumn { .. })
    ));
    assert_eq!(table.len(), 10);
}

/// Updating with the same key keeps the row findable under it.
#[test]
fn test_update_same_key() {
    let schema = student_schema();
    let mut table = Table::with_rows(&schema, roster()).unwrap();

    table
        .update("id", &json!("S2"), json!(["S2", "Ma fei", "CS", 23, "F"]))
        .unwrap();

    let found = table.find("id", &json!("S2")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].to_json(),
        json!({"id": "S2", "name": "Ma fei", "dept": "CS", "age": 23, "gender": "F"})
    );
    assert_eq!(ids(table.rows())[1], "S2");
}

/// Updating with a different key moves the row away from the old key.
#[test]
fn test_update_different_key() {
    let schema = student_schema();
    let mut table = Table::with_rows(&schema, roster()).unwrap();

    let updated = table
        .update("age", &json!(19), json!({"id": "X", "age": 40}))
        .unwrap();

    assert_eq!(updated, 4);
    assert!(table.find("age", &json!(19)).unwrap().is_empty());
    assert_eq!(table.find("id", &json!("X")).unwrap().len(), 4);
}

/// Find is ordered by table position.
#[test]
fn test_find_ordered() {
    let schema = student_schema();
    let table = Table::with_rows(&schema, roster()).unwrap();

    let found: Vec<Row> = table
        .find("age", &json!(19))
        .unwrap()
        .into_iter()
        .cloned()
        .collect();

    assert_eq!(ids(&found), vec!["S2", "S4", "S7", "S9"]);
}

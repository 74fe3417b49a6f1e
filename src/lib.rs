//! sheetdb - a minimal schema-driven tabular store
//!
//! A schema declares the columns of one table; a table holds rows that
//! conform to it. Both persist as sheet files and load independently.
//!
//! ```ignore
//! use sheetdb::schema::{ColumnSpec, ColumnType, Schema};
//! use sheetdb::table::Table;
//! use serde_json::json;
//! use std::path::Path;
//!
//! let schema = Schema::with_columns("student", [
//!     ColumnSpec::primary("id", ColumnType::Str),
//!     ColumnSpec::new("age", ColumnType::Int, 0, false, true),
//! ])?;
//! let mut table = Table::new(&schema);
//! table.append(json!(["S1", 20]))?;
//! table.save(Path::new("dataTable"))?;
//! ```

pub mod cli;
pub mod observability;
pub mod schema;
pub mod sheet;
pub mod table;

//! Schema subsystem for sheetdb
//!
//! A schema is the ordered list of column declarations for one table.
//!
//! # Rules
//!
//! - Column names are unique within a schema
//! - Column order is significant: it maps positional rows to columns
//! - A column's identity is its name; updates replace the whole spec
//! - Schemas persist independently of the tables that use them

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use loader::SCHEMA_HEADER;
pub use types::{ColumnSpec, ColumnType, Schema};

//! Table subsystem for sheetdb
//!
//! A table is an ordered row store bound to a schema it does not own.
//!
//! # Rules
//!
//! - Every row carries exactly the schema's columns, in schema order
//! - Not-null columns always hold a value (defaults fill the gaps)
//! - Primary-key values are always supplied by the caller
//! - Operations on a missing column fail; operations matching zero rows succeed

mod builder;
mod errors;
mod loader;
mod row;
mod table;

pub use builder::{is_falsy, RowBuilder};
pub use errors::{TableError, TableResult};
pub use row::{Row, RowData};
pub use table::Table;

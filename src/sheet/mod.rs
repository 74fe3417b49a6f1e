//! Sheet file codec for sheetdb
//!
//! A sheet is a header row plus data rows, one sheet per file:
//! - File name is `<sheet_name>.json`
//! - Cells are JSON values, so null, empty string and numbers survive a round-trip
//! - Whole-file blocking reads and writes, no atomic rename

mod codec;
mod errors;

pub use codec::{sheet_path, Sheet, SHEET_EXTENSION};
pub use errors::{SheetError, SheetResult};

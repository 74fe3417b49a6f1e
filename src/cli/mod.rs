//! CLI module for sheetdb
//!
//! Provides a command-line interface for:
//! - schema: show, add and drop columns
//! - insert, update, delete: row mutations written back to the data sheet
//! - find, dump: row queries
//! - check: type diagnostics

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{parse_value, Cli, Command, SchemaAction};
pub use commands::{
    check, delete, dump, find, insert, run, run_command, schema_add, schema_drop, schema_show,
    update,
};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, read_requests, write_error, write_response};

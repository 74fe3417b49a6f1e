//! sheetdb CLI entry point
//!
//! Delegates everything to `cli::run`. On failure, writes the error as a
//! JSON object on stdout and exits non-zero.

use sheetdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code_str(), e.message());
        std::process::exit(1);
    }
}

//! Configuration file for the sheetdb CLI
//!
//! A JSON object; every field is optional:
//!
//! ```json
//! { "schema_dir": "metaTable", "data_dir": "dataTable", "log_level": "warn" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::sheet::sheet_path;

/// Path used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./sheetdb.json";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding schema sheets
    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,

    /// Directory holding data sheets
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Minimum log severity: trace, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_dir() -> String {
    "metaTable".to_string()
}
fn default_data_dir() -> String {
    "dataTable".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults only when the default
    /// config path is absent. An explicit path must exist.
    pub fn resolve(path: &Path) -> CliResult<Self> {
        if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.trim().is_empty() {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(e))
    }

    pub fn schema_dir(&self) -> &Path {
        Path::new(&self.schema_dir)
    }

    pub fn data_dir(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Schema sheet of `table`
    pub fn schema_path(&self, table: &str) -> CliResult<PathBuf> {
        check_table_name(table)?;
        Ok(sheet_path(self.schema_dir(), table))
    }

    /// Data sheet of `table`
    pub fn data_path(&self, table: &str) -> CliResult<PathBuf> {
        check_table_name(table)?;
        Ok(sheet_path(self.data_dir(), table))
    }
}

/// Table names become file stems inside the configured directories and
/// must not name anything outside them.
fn check_table_name(table: &str) -> CliResult<()> {
    let escapes = table.is_empty()
        || table == "."
        || table.contains("..")
        || table.contains(&['/', '\\'][..])
        || Path::new(table).is_absolute();

    if escapes {
        return Err(CliError::invalid_input(format!(
            "Invalid table name '{}': must be a plain file stem",
            table
        )));
    }
    Ok(())
}

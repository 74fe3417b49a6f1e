//! CLI argument definitions using clap
//!
//! Commands:
//! - sheetdb schema show|add|drop <table> ...
//! - sheetdb insert <table>            (rows on stdin)
//! - sheetdb find <table> <key> <value>
//! - sheetdb delete <table> <key> <value>
//! - sheetdb update <table> <key> <value>   (new row on stdin)
//! - sheetdb dump <table>
//! - sheetdb check <table>

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use super::config::DEFAULT_CONFIG_PATH;
use crate::schema::ColumnType;

/// sheetdb - a minimal schema-driven tabular store
#[derive(Parser, Debug)]
#[command(name = "sheetdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect or edit a table's schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },

    /// Append rows read from stdin, one JSON array or object per line
    Insert {
        /// Table name
        table: String,
    },

    /// Print rows whose KEY column equals VALUE
    Find {
        table: String,
        key: String,
        /// JSON value; bare words are taken as strings
        #[arg(value_parser = parse_value, allow_hyphen_values = true)]
        value: Value,
    },

    /// Delete rows whose KEY column equals VALUE
    Delete {
        table: String,
        key: String,
        #[arg(value_parser = parse_value, allow_hyphen_values = true)]
        value: Value,
    },

    /// Overwrite rows whose KEY column equals VALUE with one row read from stdin
    Update {
        table: String,
        key: String,
        #[arg(value_parser = parse_value, allow_hyphen_values = true)]
        value: Value,
    },

    /// Print every row of a table
    Dump { table: String },

    /// List cells whose value does not match the column type
    Check { table: String },
}

#[derive(Subcommand, Debug)]
pub enum SchemaAction {
    /// Print the schema as JSON
    Show { table: String },

    /// Append a column, creating the schema if it does not exist
    Add {
        table: String,
        column: String,
        /// Column type: str, int, float or bool
        #[arg(long = "type", default_value = "str")]
        datatype: ColumnType,
        #[arg(long)]
        primary_key: bool,
        #[arg(long)]
        not_null: bool,
        /// Default value (JSON; bare words are taken as strings)
        #[arg(long, value_parser = parse_value)]
        default: Option<Value>,
    },

    /// Remove a column
    Drop { table: String, column: String },
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Schema { action } => match action {
                SchemaAction::Show { .. } => "schema show",
                SchemaAction::Add { .. } => "schema add",
                SchemaAction::Drop { .. } => "schema drop",
            },
            Command::Insert { .. } => "insert",
            Command::Find { .. } => "find",
            Command::Delete { .. } => "delete",
            Command::Update { .. } => "update",
            Command::Dump { .. } => "dump",
            Command::Check { .. } => "check",
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Parses a command-line value as JSON, falling back to a plain string.
pub fn parse_value(s: &str) -> Result<Value, String> {
    Ok(serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("19").unwrap(), json!(19));
        assert_eq!(parse_value("S2").unwrap(), json!("S2"));
        assert_eq!(parse_value("\"19\"").unwrap(), json!("19"));
        assert_eq!(parse_value("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_find() {
        let cli = Cli::try_parse_from(["sheetdb", "find", "student", "age", "19"]).unwrap();
        match cli.command {
            Command::Find { table, key, value } => {
                assert_eq!(table, "student");
                assert_eq!(key, "age");
                assert_eq!(value, json!(19));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_parse_schema_add() {
        let cli = Cli::try_parse_from([
            "sheetdb", "--config", "conf.json", "schema", "add", "student", "id",
            "--type", "str", "--primary-key", "--not-null", "--default", "",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("conf.json"));
        assert_eq!(cli.command.name(), "schema add");
        match cli.command {
            Command::Schema {
                action:
                    SchemaAction::Add {
                        datatype,
                        primary_key,
                        not_null,
                        default,
                        ..
                    },
            } => {
                assert_eq!(datatype, ColumnType::Str);
                assert!(primary_key);
                assert!(not_null);
                assert_eq!(default, Some(json!("")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["sheetdb", "check", "student"]).unwrap();
        assert_eq!(cli.command.name(), "check");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = Cli::try_parse_from([
            "sheetdb", "schema", "add", "student", "born", "--type", "date",
        ]);
        assert!(result.is_err());
    }
}

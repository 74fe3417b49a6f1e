//! CLI command implementations
//!
//! Each command loads what it needs from disk, applies one operation and
//! writes back. A failing command leaves the files as they were.

use serde_json::{json, Value};

use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope};
use crate::schema::{ColumnSpec, Schema};
use crate::table::{Table, TableError};

use super::args::{Cli, Command, SchemaAction};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_requests, write_response};

/// Main CLI entry point
///
/// Parses arguments, loads configuration and runs one command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let config = Config::resolve(&cli.config)?;
    Logger::set_min_severity(config.severity()?);
    let config_path = cli.config.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", config_path.as_str())]);

    let data = run_command(&config, cli.command)?;
    write_response(data)
}

/// Runs one command and returns its response payload
pub fn run_command(config: &Config, cmd: Command) -> CliResult<Value> {
    let scope = ObservationScope::with_fields("COMMAND", &[("command", cmd.name())]);

    let result = dispatch(config, cmd);
    match &result {
        Ok(_) => scope.complete(),
        Err(e) => scope.fail(e.code_str()),
    }
    result
}

fn dispatch(config: &Config, cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::Schema { action } => match action {
            SchemaAction::Show { table } => schema_show(config, &table),
            SchemaAction::Add {
                table,
                column,
                datatype,
                primary_key,
                not_null,
                default,
            } => {
                let spec = ColumnSpec::new(
                    column,
                    datatype,
                    default.unwrap_or(Value::Null),
                    primary_key,
                    not_null,
                );
                schema_add(config, &table, spec)
            }
            SchemaAction::Drop { table, column } => schema_drop(config, &table, &column),
        },
        Command::Insert { table } => insert(config, &table, read_requests()),
        Command::Find { table, key, value } => find(config, &table, &key, &value),
        Command::Delete { table, key, value } => delete(config, &table, &key, &value),
        Command::Update { table, key, value } => {
            let data = read_request()?;
            update(config, &table, &key, &value, data)
        }
        Command::Dump { table } => dump(config, &table),
        Command::Check { table } => check(config, &table),
    }
}

/// Print a schema
pub fn schema_show(config: &Config, table: &str) -> CliResult<Value> {
    let schema = load_schema(config, table)?;
    Ok(serde_json::to_value(&schema)?)
}

/// Append a column to a schema, creating the schema when missing
pub fn schema_add(config: &Config, table: &str, spec: ColumnSpec) -> CliResult<Value> {
    let path = config.schema_path(table)?;
    let mut schema = if path.exists() {
        Schema::load(&path)?
    } else {
        Schema::new(table)
    };

    schema.append(spec)?;
    schema.save(config.schema_dir())?;
    let data_stale = mark_data_stale(config, &schema)?;

    Ok(json!({
        "schema": table,
        "columns": schema.column_names(),
        "data_stale": data_stale,
    }))
}

/// Remove a column from a schema
pub fn schema_drop(config: &Config, table: &str, column: &str) -> CliResult<Value> {
    let mut schema = load_schema(config, table)?;

    let removed = schema.remove(column).is_some();
    let mut data_stale = false;
    if removed {
        schema.save(config.schema_dir())?;
        data_stale = mark_data_stale(config, &schema)?;
    }

    Ok(json!({
        "schema": table,
        "removed": removed,
        "columns": schema.column_names(),
        "data_stale": data_stale,
    }))
}

/// Append rows to a table. Nothing is written unless every row builds.
pub fn insert<I>(config: &Config, table: &str, rows: I) -> CliResult<Value>
where
    I: IntoIterator<Item = CliResult<Value>>,
{
    let schema = load_schema(config, table)?;
    let mut data = load_table(config, &schema)?;

    let mut inserted = 0usize;
    for row in rows {
        data.append(row?)?;
        inserted += 1;
    }

    if inserted == 0 {
        return Err(CliError::invalid_input("No rows on stdin"));
    }

    data.save(config.data_dir())?;
    Ok(json!({ "table": table, "inserted": inserted, "rows": data.len() }))
}

/// Rows whose `key` column equals `value`
pub fn find(config: &Config, table: &str, key: &str, value: &Value) -> CliResult<Value> {
    let schema = load_schema(config, table)?;
    let data = load_table(config, &schema)?;

    let rows: Vec<Value> = data.find(key, value)?.into_iter().map(|r| r.to_json()).collect();
    Ok(Value::Array(rows))
}

/// Delete rows whose `key` column equals `value`
pub fn delete(config: &Config, table: &str, key: &str, value: &Value) -> CliResult<Value> {
    let schema = load_schema(config, table)?;
    let mut data = load_table(config, &schema)?;

    let removed = data.remove(key, value)?;
    if removed > 0 {
        data.save(config.data_dir())?;
    }

    Ok(json!({ "table": table, "removed": removed, "rows": data.len() }))
}

/// Overwrite rows whose `key` column equals `value` with `new_data`
pub fn update(
    config: &Config,
    table: &str,
    key: &str,
    value: &Value,
    new_data: Value,
) -> CliResult<Value> {
    let schema = load_schema(config, table)?;
    let mut data = load_table(config, &schema)?;

    let updated = data.update(key, value, new_data)?;
    if updated > 0 {
        data.save(config.data_dir())?;
    }

    Ok(json!({ "table": table, "updated": updated }))
}

/// Every row of a table
pub fn dump(config: &Config, table: &str) -> CliResult<Value> {
    let schema = load_schema(config, table)?;
    let data = load_table(config, &schema)?;

    Ok(Value::Array(data.rows().iter().map(|r| r.to_json()).collect()))
}

/// Cells whose value does not have the column's declared type
pub fn check(config: &Config, table: &str) -> CliResult<Value> {
    let schema = load_schema(config, table)?;
    let data = load_table(config, &schema)?;

    let violations: Vec<Value> = data
        .type_violations()
        .into_iter()
        .map(|(row, column)| json!({ "row": row, "column": column }))
        .collect();

    Ok(json!({ "table": table, "violations": violations }))
}

fn load_schema(config: &Config, table: &str) -> CliResult<Schema> {
    Ok(Schema::load(&config.schema_path(table)?)?)
}

/// Loads the data sheet for `schema`, or an empty table when none exists yet
fn load_table<'s>(config: &Config, schema: &'s Schema) -> CliResult<Table<'s>> {
    let path = config.data_path(schema.name())?;
    if !path.exists() {
        return Ok(Table::new(schema));
    }
    Ok(Table::load(&path, schema)?)
}

/// Whether the table's data file exists but no longer loads under `schema`.
fn mark_data_stale(config: &Config, schema: &Schema) -> CliResult<bool> {
    let path = config.data_path(schema.name())?;
    if !path.exists() {
        return Ok(false);
    }

    match Table::load(&path, schema) {
        Ok(_) => Ok(false),
        Err(TableError::SchemaMismatch { .. }) => {
            let path_str = path.display().to_string();
            Logger::warn(
                "DATA_FILE_STALE",
                &[("table", schema.name()), ("path", path_str.as_str())],
            );
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

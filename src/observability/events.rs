//! Observable events for sheetdb
//!
//! Events are explicit and typed. Every persistence operation and every
//! bulk row mutation has a named event.

use std::fmt;

/// Observable events in sheetdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Schema persistence
    /// Schema written to disk
    SchemaSaved,
    /// Schema read from disk
    SchemaLoaded,

    // Schema mutation
    /// Column appended to a schema
    ColumnAppended,
    /// Column removed from a schema
    ColumnRemoved,
    /// Column replaced in a schema
    ColumnUpdated,

    // Table persistence
    /// Table written to disk
    TableSaved,
    /// Table read from disk
    TableLoaded,

    // Table mutation
    /// Rows deleted by key
    RowsRemoved,
    /// Rows overwritten by key
    RowsUpdated,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaSaved => "SCHEMA_SAVED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::ColumnAppended => "COLUMN_APPENDED",
            Event::ColumnRemoved => "COLUMN_REMOVED",
            Event::ColumnUpdated => "COLUMN_UPDATED",
            Event::TableSaved => "TABLE_SAVED",
            Event::TableLoaded => "TABLE_LOADED",
            Event::RowsRemoved => "ROWS_REMOVED",
            Event::RowsUpdated => "ROWS_UPDATED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

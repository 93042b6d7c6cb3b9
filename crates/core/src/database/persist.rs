//! Reading and writing persisted rename tables
//!
//! The persisted form is a JSON object of objects, `{scope: {old: new}}`.
//! Key order is kept on both sides so a table written by the merge workflow
//! reads back in declaration order.

use crate::error::{Error, Result, ResultExt};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use super::ScopeTables;

/// Parse a rename table from its JSON text
pub fn tables_from_json_str(content: &str) -> Result<ScopeTables> {
    serde_json::from_str(content)
        .map_err(|e| Error::database(format!("Failed to parse rename table: {e}")))
}

/// Read a rename table from a JSON file
pub fn read_tables(path: &Path) -> Result<ScopeTables> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read rename table {}", path.display()))?;
    let tables = tables_from_json_str(&content).map_err(|e| match e {
        Error::Database(msg) => Error::database(format!("{}: {msg}", path.display())),
        other => other,
    })?;
    debug!("Read {} scopes from {}", tables.len(), path.display());
    Ok(tables)
}

/// Render a rename table as JSON with three-space indentation
pub fn tables_to_json_string(tables: &ScopeTables) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tables.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::database(format!("Rename table is not UTF-8: {e}")))
}

/// Write a rename table to a JSON file, replacing any existing file
pub fn write_tables(path: &Path, tables: &ScopeTables) -> Result<()> {
    let content = tables_to_json_string(tables)?;
    std::fs::write(path, content)
        .context(format!("Failed to write rename table {}", path.display()))?;
    debug!("Wrote {} scopes to {}", tables.len(), path.display());
    Ok(())
}

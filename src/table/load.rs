use crate::Result;
use crate::diagnostics::Diagnostics;
use crate::table::{Table, Value};

use anyhow::bail;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Cell shape: integer counter (possibly negative in malformed logs).
pub const INT_RE: &str = r"^-?\d+$";
/// Cell shape: decimal number of seconds.
pub const FLOAT_RE: &str = r"^-?\d+(?:\.\d+)?$";

/// Load a comma-delimited log file into a [`Table`].
///
/// Failure never reaches the caller: a missing file is a normal "no data yet"
/// condition (one warning, `None`), an unreadable or ragged file is one error
/// plus `None`.
pub fn load(path: &Path, diag: &mut Diagnostics) -> Option<Table> {
    if !path.exists() {
        diag.warn(format!("File not found: {}", path.display()));
        return None;
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            diag.error(format!("Failed to load {}: {}", path.display(), err));
            return None;
        }
    };

    match parse_table(&text, path) {
        Ok(table) => Some(table),
        Err(err) => {
            diag.error(format!("Failed to load {}: {:#}", path.display(), err));
            None
        }
    }
}

/// Parse comma-delimited text: first line is the header, every following
/// non-empty line must have exactly one cell per header column.
fn parse_table(text: &str, path: &Path) -> Result<Table> {
    let int_re = Regex::new(INT_RE)?;
    let float_re = Regex::new(FLOAT_RE)?;

    let mut lines = text.lines().enumerate();

    let columns: Vec<String> = match lines.next() {
        Some((_, header)) => split_row(header).map(str::to_string).collect(),
        None => bail!("empty table file"),
    };
    if columns.iter().any(|c| c.is_empty()) {
        bail!("header has an empty column name");
    }

    let mut rows = Vec::new();
    for (lineno, line) in lines {
        let lno = lineno + 1;
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = split_row(line).collect();
        if cells.len() != columns.len() {
            bail!(
                "row at {}:{} has {} columns, expected {}",
                path.display(),
                lno,
                cells.len(),
                columns.len()
            );
        }

        rows.push(
            cells
                .iter()
                .map(|cell| Value::classify(cell, &int_re, &float_re))
                .collect(),
        );
    }

    Ok(Table { columns, rows })
}

fn split_row(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}

/// Convenience for tests and fixtures: parse in-memory CSV text directly.
#[cfg(test)]
pub fn parse_str(text: &str) -> Result<Table> {
    parse_table(text, Path::new("<memory>"))
}

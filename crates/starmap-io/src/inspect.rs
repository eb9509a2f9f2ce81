//! Dataset inspection for picking overrides by hand.

use std::fmt;

use crate::query::Projection;
use crate::schema::{ColumnDescriptor, Row};
use crate::source::{DataSource, SourceResult};

/// Fragments that mark a column as position-like anywhere in its name
const POSITION_HINTS: &[&str] = &["center", "pos"];

/// Axis letters that mark a column as position-like when they end its name
const AXIS_SUFFIXES: &[char] = &['x', 'y', 'z'];

/// What `inspect` found in a source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectReport {
    pub tables: Vec<String>,
    pub table: Option<TableInspection>,
}

/// Detail for the inspected table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInspection {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub sample_rows: Vec<Row>,
    pub position_columns: Vec<String>,
    /// Rows of the first three position columns where the first is non-zero
    pub position_samples: Vec<Row>,
}

/// True when a column name looks like it could hold a coordinate.
pub fn is_position_like(column: &str) -> bool {
    let lower = column.to_lowercase();
    POSITION_HINTS.iter().any(|hint| lower.contains(hint)) || lower.ends_with(AXIS_SUFFIXES)
}

/// Inspect `table`, or the first table when none is given.
pub fn inspect<S: DataSource + ?Sized>(
    source: &S,
    table: Option<&str>,
    limit: usize,
) -> SourceResult<InspectReport> {
    let tables = source.table_names()?;
    let target = match table {
        Some(t) => Some(t.to_string()),
        None => tables.first().cloned(),
    };

    let table = match target {
        Some(name) => Some(inspect_table(source, name, limit)?),
        None => None,
    };
    Ok(InspectReport { tables, table })
}

fn inspect_table<S: DataSource + ?Sized>(
    source: &S,
    name: String,
    limit: usize,
) -> SourceResult<TableInspection> {
    let columns = source.table_schema(&name)?.columns;
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let sample_rows = source.select(&Projection::new(&name, names.iter().copied()).with_limit(limit))?;

    let position_columns: Vec<String> = names
        .iter()
        .filter(|c| is_position_like(c))
        .map(|c| c.to_string())
        .collect();

    let position_samples = match position_columns.first() {
        Some(first) => source.select(
            &Projection::new(&name, position_columns.iter().take(3))
                .with_nonzero(first)
                .with_limit(limit),
        )?,
        None => Vec::new(),
    };

    Ok(TableInspection {
        name,
        columns,
        sample_rows,
        position_columns,
        position_samples,
    })
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &Row) -> fmt::Result {
    let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
    writeln!(f, "  ({})", cells.join(", "))
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tables: {:?}", self.tables)?;

        let Some(table) = &self.table else {
            return Ok(());
        };

        writeln!(f)?;
        let columns: Vec<String> = table.columns.iter().map(|c| c.to_string()).collect();
        writeln!(f, "Table '{}' columns: {}", table.name, columns.join(", "))?;
        writeln!(f, "Sample rows from '{}':", table.name)?;
        for row in &table.sample_rows {
            write_row(f, row)?;
        }

        if !table.position_columns.is_empty() {
            writeln!(f)?;
            writeln!(f, "Position-related columns: {:?}", table.position_columns)?;
            writeln!(f, "Non-zero position samples:")?;
            for row in &table.position_samples {
                write_row(f, row)?;
            }
        }
        Ok(())
    }
}

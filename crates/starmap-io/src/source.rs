//! Data source trait and errors
//!
//! The `DataSource` trait is the only surface the loader and inspector
//! need from a database: enumerate tables, describe a table, run a
//! projection.

use crate::query::Projection;
use crate::schema::{Row, TableSchema};
use starmap_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while reading a source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Database not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("System id in {table}.{column} is not an integer: {value}")]
    InvalidId {
        table: String,
        column: String,
        value: String,
    },

    #[error("Coordinate in {table}.{column} is not a number: {value}")]
    InvalidCoordinate {
        table: String,
        column: String,
        value: String,
    },
}

impl From<rusqlite::Error> for SourceError {
    fn from(err: rusqlite::Error) -> Self {
        SourceError::Database(err.to_string())
    }
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// A relational source that can be introspected and projected.
pub trait DataSource {
    /// Table names in enumeration order
    fn table_names(&self) -> SourceResult<Vec<String>>;

    /// Columns of a table; empty when the table does not exist
    fn table_schema(&self, table: &str) -> SourceResult<TableSchema>;

    /// Run a projection and materialize every row
    fn select(&self, projection: &Projection) -> SourceResult<Vec<Row>>;

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// Open a database file read-only.
pub fn open_source(path: &str) -> SourceResult<Box<dyn DataSource>> {
    use crate::sqlite_source::SqliteSource;
    Ok(Box::new(SqliteSource::open(path)?))
}

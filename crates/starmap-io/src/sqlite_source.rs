//! SQLite source, opened read-only

use crate::query::{quote_ident, Projection};
use crate::schema::{ColumnDescriptor, Row, TableSchema, Value};
use crate::source::{DataSource, SourceError, SourceResult};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

/// SQLite database source
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open a database file read-only
    pub fn open(path: &str) -> SourceResult<Self> {
        if !Path::new(path).exists() {
            return Err(SourceError::FileNotFound(path.to_string()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| SourceError::OpenFailed(format!("{}: {}", path, e)))?;

        Ok(Self { conn })
    }

    /// Wrap an existing connection (for in-memory databases)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl DataSource for SqliteSource {
    fn table_names(&self) -> SourceResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY rowid")?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(?tables, "enumerated tables");
        Ok(tables)
    }

    fn table_schema(&self, table: &str) -> SourceResult<TableSchema> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let columns = stmt
            .query_map([], |row| {
                let name: String = row.get(1)?;
                let declared_type: String = row.get(2)?;
                Ok(ColumnDescriptor::new(name, declared_type))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TableSchema::new(table, columns))
    }

    fn select(&self, projection: &Projection) -> SourceResult<Vec<Row>> {
        let sql = projection.to_sql();
        debug!(%sql, "running projection");

        let mut stmt = self.conn.prepare(&sql)?;
        let width = stmt.column_count();
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, rusqlite::types::Value>(i).map(Value::from))
                    .collect::<Result<Row, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn format_name(&self) -> &'static str {
        "SQLite"
    }
}

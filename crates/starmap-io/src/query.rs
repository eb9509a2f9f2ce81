//! Projection queries compiled to SQL.

/// A `SELECT` over named columns of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub table: String,
    pub columns: Vec<String>,
    /// Keep only rows where this column is non-zero
    pub nonzero: Option<String>,
    pub limit: Option<usize>,
}

impl Projection {
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            nonzero: None,
            limit: None,
        }
    }

    pub fn with_nonzero(mut self, column: impl Into<String>) -> Self {
        self.nonzero = Some(column.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Translate into a SQL statement with every identifier quoted.
    pub fn to_sql(&self) -> String {
        let cols = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {} FROM {}", cols, quote_ident(&self.table));
        if let Some(ref column) = self.nonzero {
            sql.push_str(&format!(" WHERE {} != 0", quote_ident(column)));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        sql
    }
}

/// Quote an identifier for SQLite, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

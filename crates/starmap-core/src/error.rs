//! Error types for starmap-core

use std::path::PathBuf;
use thiserror::Error;

/// Schema inference errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// The source has no tables at all and no override was given
    #[error("Could not find systems table; use --systems-table to specify.")]
    NoSystemsTable,

    /// The systems table exposes no columns to pick an id from
    #[error("Table '{table}' has no columns; use --sys-id-col to specify.")]
    NoColumns { table: String },

    /// An override names a column the table does not have
    #[error("Table '{table}' has no column '{column}'")]
    UnknownColumn { table: String, column: String },
}

/// Asset layout or output errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// A system id does not fit the unsigned 32-bit output layout
    #[error("System id {id} does not fit in an unsigned 32-bit integer")]
    IdOutOfRange { id: i64 },

    /// An asset file has a length or content that does not match its layout
    #[error("Corrupt asset {file}: {reason}")]
    Corrupt { file: String, reason: String },

    /// Writing or reading an asset failed
    #[error("IO error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        AssetError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::Serialization(err.to_string())
    }
}

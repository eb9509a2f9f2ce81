//! Error type for a build run

use std::path::PathBuf;
use thiserror::Error;

use starmap_core::AssetError;
use starmap_io::SourceError;

/// Result type alias for build runs
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Anything that aborts a build run
#[derive(Error, Debug)]
pub enum BuildError {
    /// Reading or inferring the source failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Laying out or writing assets failed
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The output directory could not be resolved after writing
    #[error("Could not resolve output path {path}: {message}")]
    OutputPath { path: PathBuf, message: String },

    /// The run summary could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::Serialization(err.to_string())
    }
}

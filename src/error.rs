//! Error types for sat-frames

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the crate's ingestion boundaries.
///
/// Geometry never returns these: degenerate frames, clamped latitudes and
/// failed propagation are handled in-band by the functions themselves.
#[derive(Error, Debug)]
pub enum Error {
    /// Error when a file I/O operation fails
    #[error("File I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Error when a JSON document cannot be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error when a configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error when calendar fields do not form a valid UTC instant
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error when footprint data matches neither supported shape
    #[error("Invalid footprint data: {0}")]
    InvalidFootprint(String),
}

/// Result type for sat-frames operations
pub type Result<T> = std::result::Result<T, Error>;

/// Convert a std::io::Error to Error with path context
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> Error {
    Error::Io {
        path: path.into(),
        source: err,
    }
}

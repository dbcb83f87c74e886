//! Common error types for the evidence review services

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for evidence operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds surfaced by the data aggregator and configuration loader
#[derive(Error, Debug)]
pub enum Error {
    /// Requested identifier has no backing file
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O failure on an existing or expected path
    #[error("Read failure on {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File was readable but its JSON content was not
    #[error("Parse failure on {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors that map to "no such resource" rather than a server fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

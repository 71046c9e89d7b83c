//! Error type for the fallible edges of the crate (file and network I/O).
//!
//! Rendering itself never fails: bad or missing data degrades to an empty
//! or flat chart. Only loading, exporting and fetching return [`Error`].

use std::path::PathBuf;

/// Convenience alias used by `storage` and `api`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request to {url} failed with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response shape from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

//! Error types for protodox core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type.
///
/// Classification and rewriting never fail; only reading the source or
/// writing the sink can.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the input failed.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// Writing the output failed.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    /// An input file could not be opened.
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates an open error for the given path.
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error came from the output side.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}

/// Result type alias for protodox core operations.
pub type Result<T> = std::result::Result<T, Error>;

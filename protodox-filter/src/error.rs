//! Error types for filter runs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a filter run.
///
/// Problems with individual inputs are not errors at this level; they are
/// recorded in the [`RunReport`](crate::RunReport) and the run continues.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The schema file pattern is not a valid glob.
    #[error("invalid schema pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// The underlying error from globset.
        #[source]
        source: globset::Error,
    },

    /// The discovery directory could not be listed.
    #[error("cannot list directory '{}': {source}", dir.display())]
    Discovery {
        /// Directory being listed.
        dir: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to the output failed.
    #[error("output error: {0}")]
    Output(#[source] std::io::Error),
}

impl FilterError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: globset::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

/// Result type alias for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

//! Filter configuration.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default schema file pattern.
pub const DEFAULT_SCHEMA_PATTERN: &str = "*.proto";
/// Default location of the line-by-line debug log.
pub const DEFAULT_DEBUG_LOG: &str = "protodox.log";
/// Default location of the error log.
pub const DEFAULT_ERROR_LOG: &str = "protodox.error.log";

/// How much the diagnostic logs record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Nothing is written to the log files.
    #[default]
    None,
    /// Only failures are written to the error log.
    Errors,
    /// Failures plus every line before and after rewriting.
    All,
}

impl LogLevel {
    /// Returns true if failures go to the error log.
    #[must_use]
    pub const fn records_errors(self) -> bool {
        matches!(self, Self::Errors | Self::All)
    }

    /// Returns true if every rewritten line goes to the debug log.
    #[must_use]
    pub const fn records_lines(self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Errors => "errors",
            Self::All => "all",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown log level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}' (expected none, errors or all)")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "0" => Ok(Self::None),
            "errors" | "error" | "1" => Ok(Self::Errors),
            "all" | "everything" | "2" => Ok(Self::All),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

/// Immutable settings for one filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    log_level: LogLevel,
    debug_log: PathBuf,
    error_log: PathBuf,
    schema_pattern: String,
    self_name: Option<OsString>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::None,
            debug_log: PathBuf::from(DEFAULT_DEBUG_LOG),
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
            schema_pattern: DEFAULT_SCHEMA_PATTERN.to_string(),
            self_name: None,
        }
    }
}

impl Settings {
    /// Creates default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostic log level.
    #[must_use]
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Sets the debug log path.
    #[must_use]
    pub fn with_debug_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_log = path.into();
        self
    }

    /// Sets the error log path.
    #[must_use]
    pub fn with_error_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_log = path.into();
        self
    }

    /// Sets the glob matched against file names to select schema files.
    #[must_use]
    pub fn with_schema_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.schema_pattern = pattern.into();
        self
    }

    /// Sets the file name of the tool itself, which is never emitted.
    #[must_use]
    pub fn with_self_name(mut self, name: impl Into<OsString>) -> Self {
        self.self_name = Some(name.into());
        self
    }

    /// Diagnostic log level.
    #[must_use]
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Debug log path.
    #[must_use]
    pub fn debug_log(&self) -> &Path {
        &self.debug_log
    }

    /// Error log path.
    #[must_use]
    pub fn error_log(&self) -> &Path {
        &self.error_log
    }

    /// Schema file pattern.
    #[must_use]
    pub fn schema_pattern(&self) -> &str {
        &self.schema_pattern
    }

    /// File name of the tool itself, if known.
    #[must_use]
    pub fn self_name(&self) -> Option<&OsString> {
        self.self_name.as_ref()
    }
}

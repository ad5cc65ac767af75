//! Diagnostic log files.
//!
//! Optional append-only logs next to the normal output: the debug log
//! records every line before and after rewriting, the error log records
//! inputs that could not be processed. Neither ever changes what is written
//! to the output. A log that cannot be opened is disabled with a warning.

use crate::config::{LogLevel, Settings};
use protodox_core::{LineObserver, Rewrite, TransformStats};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum SinkState {
    Closed,
    Open(File),
    Disabled,
}

/// One lazily opened log file.
#[derive(Debug)]
struct LogSink {
    path: PathBuf,
    state: SinkState,
}

impl LogSink {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            state: SinkState::Closed,
        }
    }

    fn write_line(&mut self, text: &str) {
        if let SinkState::Closed = self.state {
            self.state = match OpenOptions::new().create(true).append(true).open(&self.path) {
                Ok(file) => SinkState::Open(file),
                Err(e) => {
                    tracing::warn!("Cannot open log {}: {}", self.path.display(), e);
                    SinkState::Disabled
                }
            };
        }

        if let SinkState::Open(file) = &mut self.state {
            if let Err(e) = writeln!(file, "{text}") {
                tracing::warn!("Cannot write log {}: {}", self.path.display(), e);
                self.state = SinkState::Disabled;
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            SinkState::Open(file) => file.flush(),
            _ => Ok(()),
        }
    }
}

/// The diagnostic collaborator of a filter run.
#[derive(Debug)]
pub struct Diagnostics {
    level: LogLevel,
    debug: LogSink,
    errors: LogSink,
    current: Option<PathBuf>,
    errors_recorded: usize,
}

impl Diagnostics {
    /// Creates diagnostics for `settings`. No file is opened until needed.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            level: settings.log_level(),
            debug: LogSink::new(settings.debug_log()),
            errors: LogSink::new(settings.error_log()),
            current: None,
            errors_recorded: 0,
        }
    }

    /// Configured log level.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Number of errors recorded so far.
    #[must_use]
    pub fn errors_recorded(&self) -> usize {
        self.errors_recorded
    }

    /// Marks the start of a new input.
    pub fn begin_input(&mut self, path: &Path) {
        self.current = Some(path.to_path_buf());
        if self.level.records_lines() {
            self.debug
                .write_line(&format!("=== {} ===", path.display()));
        }
    }

    /// Records an input that could not be processed.
    pub fn record_error(&mut self, path: &Path, error: &dyn std::error::Error) {
        self.errors_recorded += 1;
        tracing::error!("{}: {}", path.display(), error);
        if self.level.records_errors() {
            self.errors
                .write_line(&format!("{}: {}", path.display(), error));
        }
    }

    /// Flushes both logs.
    pub fn flush(&mut self) {
        for sink in [&mut self.debug, &mut self.errors] {
            if let Err(e) = sink.flush() {
                tracing::warn!("Cannot flush log {}: {}", sink.path.display(), e);
            }
        }
    }

    fn current_name(&self) -> String {
        self.current
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string())
    }
}

impl LineObserver for Diagnostics {
    fn on_line(&mut self, line_number: usize, before: &str, after: &Rewrite) {
        if !self.level.records_lines() {
            return;
        }
        let name = self.current_name();
        self.debug
            .write_line(&format!("{name}:{line_number}: < {before}"));
        for line in after.lines() {
            self.debug
                .write_line(&format!("{name}:{line_number}: > {line}"));
        }
    }

    fn on_session_end(&mut self, stats: &TransformStats) {
        if !self.level.records_lines() {
            return;
        }
        let name = self.current_name();
        self.debug.write_line(&format!(
            "{name}: {} lines in, {} lines out, {} comments hoisted",
            stats.lines_read, stats.lines_written, stats.hoisted_comments
        ));
        if stats.ended_inside_enum {
            self.debug
                .write_line(&format!("{name}: input ended inside an enum body"));
        }
    }
}

impl Drop for Diagnostics {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protodox_core::StreamDriver;
    use std::fs;

    fn settings_in(dir: &Path, level: LogLevel) -> Settings {
        Settings::default()
            .with_log_level(level)
            .with_debug_log(dir.join("debug.log"))
            .with_error_log(dir.join("error.log"))
    }

    fn missing() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "not found")
    }

    #[test]
    fn test_level_none_writes_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut diagnostics = Diagnostics::new(&settings_in(dir.path(), LogLevel::None));
        diagnostics.begin_input(Path::new("a.proto"));
        diagnostics.record_error(Path::new("a.proto"), &missing());
        drop(diagnostics);

        assert!(!dir.path().join("debug.log").exists());
        assert!(!dir.path().join("error.log").exists());
    }

    #[test]
    fn test_level_errors_writes_error_log_only() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut diagnostics = Diagnostics::new(&settings_in(dir.path(), LogLevel::Errors));
        diagnostics.begin_input(Path::new("a.proto"));
        diagnostics.record_error(Path::new("a.proto"), &missing());
        assert_eq!(diagnostics.errors_recorded(), 1);
        drop(diagnostics);

        let errors = fs::read_to_string(dir.path().join("error.log")).expect("error log");
        assert_eq!(errors, "a.proto: not found\n");
        assert!(!dir.path().join("debug.log").exists());
    }

    #[test]
    fn test_level_all_records_lines() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut diagnostics = Diagnostics::new(&settings_in(dir.path(), LogLevel::All));
        diagnostics.begin_input(Path::new("a.proto"));

        let mut out = Vec::new();
        StreamDriver::with_observer(&mut diagnostics)
            .run("message A {\n  int32 x = 1; // x\n".as_bytes(), &mut out)
            .expect("run");
        drop(diagnostics);

        let debug = fs::read_to_string(dir.path().join("debug.log")).expect("debug log");
        let expected = "\
=== a.proto ===
a.proto:1: < message A {
a.proto:1: > struct A {
a.proto:2: <   int32 x = 1; // x
a.proto:2: >  /// x
a.proto:2: >   int32 x = 1;
a.proto: 2 lines in, 3 lines out, 1 comments hoisted
";
        assert_eq!(debug, expected);
    }

    #[test]
    fn test_logs_append() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("error.log"), "earlier\n").expect("write");

        let mut diagnostics = Diagnostics::new(&settings_in(dir.path(), LogLevel::Errors));
        diagnostics.record_error(Path::new("b.proto"), &missing());
        drop(diagnostics);

        let errors = fs::read_to_string(dir.path().join("error.log")).expect("error log");
        assert_eq!(errors, "earlier\nb.proto: not found\n");
    }

    #[test]
    fn test_unopenable_log_is_disabled() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = Settings::default()
            .with_log_level(LogLevel::All)
            .with_error_log(dir.path().join("missing-dir").join("error.log"));
        let mut diagnostics = Diagnostics::new(&settings);
        diagnostics.record_error(Path::new("a.proto"), &missing());
        diagnostics.record_error(Path::new("b.proto"), &missing());
        assert_eq!(diagnostics.errors_recorded(), 2);
        assert!(matches!(diagnostics.errors.state, SinkState::Disabled));
    }
}

//! Filter runs over a batch of inputs.

use crate::config::Settings;
use crate::diagnostics::Diagnostics;
use crate::error::{FilterError, Result};
use crate::input::{InputClassifier, InputKind, copy_verbatim, discover};
use protodox_core::StreamDriver;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An input that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFailure {
    /// The input path.
    pub path: PathBuf,
    /// Human-readable reason.
    pub message: String,
}

/// Outcome of a filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Schema files rewritten.
    pub transformed: usize,
    /// Other files copied verbatim.
    pub passed_through: usize,
    /// Inputs skipped because they are the tool itself.
    pub skipped: usize,
    /// Lines written to the output.
    pub lines_written: usize,
    /// Inputs that could not be read.
    pub failures: Vec<InputFailure>,
}

impl RunReport {
    /// Returns true if every input was processed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of inputs seen.
    #[must_use]
    pub fn inputs(&self) -> usize {
        self.transformed + self.passed_through + self.skipped + self.failures.len()
    }
}

/// Runs inputs through the rewriter or the passthrough copy.
///
/// Every schema file gets its own [`StreamDriver`] session, so enum state
/// never carries from one file to the next.
#[derive(Debug)]
pub struct FilterSession {
    settings: Settings,
    classifier: InputClassifier,
    diagnostics: Diagnostics,
}

impl FilterSession {
    /// Creates a session for `settings`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidPattern` if the schema pattern is invalid.
    pub fn new(settings: Settings) -> Result<Self> {
        let classifier = InputClassifier::new(&settings)?;
        let diagnostics = Diagnostics::new(&settings);
        Ok(Self {
            settings,
            classifier,
            diagnostics,
        })
    }

    /// Settings of this session.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Input classifier of this session.
    #[must_use]
    pub fn classifier(&self) -> &InputClassifier {
        &self.classifier
    }

    /// Processes `inputs` in order, writing everything to `out`.
    ///
    /// Inputs that cannot be opened or read are recorded and skipped.
    ///
    /// # Errors
    /// Returns `FilterError::Output` if writing to `out` fails.
    pub fn run<W: Write>(&mut self, inputs: &[PathBuf], mut out: W) -> Result<RunReport> {
        let mut report = RunReport::default();
        for path in inputs {
            self.process(path, &mut out, &mut report)?;
        }
        self.diagnostics.flush();

        tracing::info!(
            "Processed {} inputs: {} rewritten, {} copied, {} skipped, {} failed",
            report.inputs(),
            report.transformed,
            report.passed_through,
            report.skipped,
            report.failures.len()
        );
        Ok(report)
    }

    /// Processes every schema file found directly inside `dir`.
    ///
    /// # Errors
    /// Returns `FilterError::Discovery` if `dir` cannot be listed and
    /// `FilterError::Output` if writing to `out` fails.
    pub fn run_discovered<W: Write>(&mut self, dir: &Path, out: W) -> Result<RunReport> {
        let inputs = discover(dir, &self.classifier)?;
        self.run(&inputs, out)
    }

    fn process<W: Write>(
        &mut self,
        path: &Path,
        out: &mut W,
        report: &mut RunReport,
    ) -> Result<()> {
        let kind = self.classifier.classify(path);
        tracing::debug!("{} classified as {:?}", path.display(), kind);

        let outcome = match kind {
            InputKind::SelfIdentity => {
                report.skipped += 1;
                return Ok(());
            }
            InputKind::Schema => {
                self.diagnostics.begin_input(path);
                StreamDriver::with_observer(&mut self.diagnostics)
                    .run_file(path, &mut *out)
                    .map(|stats| {
                        report.transformed += 1;
                        stats.lines_written
                    })
            }
            InputKind::Passthrough => copy_verbatim(path, &mut *out).map(|lines| {
                report.passed_through += 1;
                lines
            }),
        };

        match outcome {
            Ok(lines) => {
                report.lines_written += lines;
                Ok(())
            }
            Err(protodox_core::Error::Write(e)) => Err(FilterError::Output(e)),
            Err(e) => {
                self.diagnostics.record_error(path, &e);
                report.failures.push(InputFailure {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use std::fs;

    fn quiet_settings(dir: &Path) -> Settings {
        Settings::default()
            .with_debug_log(dir.join("debug.log"))
            .with_error_log(dir.join("error.log"))
    }

    #[test]
    fn test_run_mixed_inputs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let schema = dir.path().join("a.proto");
        let header = dir.path().join("b.h");
        fs::write(&schema, "message A {\n}\n").expect("write");
        fs::write(&header, "struct B {};\n").expect("write");

        let mut session = FilterSession::new(quiet_settings(dir.path())).expect("session");
        let mut out = Vec::new();
        let report = session.run(&[schema, header], &mut out).expect("run");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "struct A {\n};\nstruct B {};\n"
        );
        assert_eq!(report.transformed, 1);
        assert_eq!(report.passed_through, 1);
        assert_eq!(report.lines_written, 3);
        assert!(report.is_clean());
    }

    #[test]
    fn test_enum_state_does_not_leak_between_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let truncated = dir.path().join("a.proto");
        let next = dir.path().join("b.proto");
        fs::write(&truncated, "enum Cut {\n  A = 0;\n").expect("write");
        fs::write(&next, "int32 x = 1;\n}\n").expect("write");

        let mut session = FilterSession::new(quiet_settings(dir.path())).expect("session");
        let mut out = Vec::new();
        session.run(&[truncated, next], &mut out).expect("run");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "enum Cut {\n  A = 0,\nint32 x = 1;\n};\n"
        );
    }

    #[test]
    fn test_missing_file_is_recorded_and_run_continues() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.proto");
        let present = dir.path().join("present.proto");
        fs::write(&present, "// ok\n").expect("write");

        let settings = quiet_settings(dir.path()).with_log_level(LogLevel::Errors);
        let mut session = FilterSession::new(settings).expect("session");
        let mut out = Vec::new();
        let report = session.run(&[missing.clone(), present], &mut out).expect("run");

        assert_eq!(String::from_utf8(out).expect("utf8"), "/// ok\n");
        assert_eq!(report.transformed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, missing);
        assert!(!report.is_clean());
        drop(session);

        let errors = fs::read_to_string(dir.path().join("error.log")).expect("error log");
        assert!(errors.contains("missing.proto"));
    }

    #[test]
    fn test_missing_passthrough_is_recorded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = FilterSession::new(quiet_settings(dir.path())).expect("session");
        let mut out = Vec::new();
        let report = session
            .run(&[dir.path().join("gone.txt")], &mut out)
            .expect("run");
        assert!(out.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_directory_input_is_recorded() {
        let dir = tempfile::tempdir().expect("temp dir");
        let subdir = dir.path().join("nested.proto");
        fs::create_dir(&subdir).expect("mkdir");

        let mut session = FilterSession::new(quiet_settings(dir.path())).expect("session");
        let report = session.run(&[subdir], Vec::new()).expect("run");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.transformed, 0);
    }

    #[test]
    fn test_self_identity_is_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tool = dir.path().join("protodox");
        fs::write(&tool, "binary").expect("write");

        let settings = quiet_settings(dir.path()).with_self_name("protodox");
        let mut session = FilterSession::new(settings).expect("session");
        let mut out = Vec::new();
        let report = session.run(&[tool], &mut out).expect("run");
        assert!(out.is_empty());
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_run_discovered() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("b.proto"), "message B {\n}\n").expect("write");
        fs::write(dir.path().join("a.proto"), "message A {\n}\n").expect("write");
        fs::write(dir.path().join("readme.md"), "# not a schema\n").expect("write");

        let mut session = FilterSession::new(quiet_settings(dir.path())).expect("session");
        let mut out = Vec::new();
        let report = session.run_discovered(dir.path(), &mut out).expect("run");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "struct A {\n};\nstruct B {\n};\n"
        );
        assert_eq!(report.transformed, 2);
        assert_eq!(report.passed_through, 0);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_failure_is_fatal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let schema = dir.path().join("a.proto");
        fs::write(&schema, "message A {\n}\n").expect("write");

        let mut session = FilterSession::new(quiet_settings(dir.path())).expect("session");
        let err = session.run(&[schema], ClosedPipe).expect_err("should fail");
        assert!(matches!(err, FilterError::Output(_)));
    }
}

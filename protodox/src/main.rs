//! `protodox` command-line filter.
//!
//! ## Usage
//!
//! ```bash
//! # Rewrite one schema (what Doxygen's INPUT_FILTER does)
//! protodox api.proto
//!
//! # Rewrite every *.proto in the current directory
//! protodox
//!
//! # Keep a line-by-line log of every rewrite
//! protodox --log-level all --debug-log /tmp/protodox.log api.proto
//! ```

use anyhow::Context;
use clap::Parser;
use protodox::filter::config::{DEFAULT_DEBUG_LOG, DEFAULT_ERROR_LOG, DEFAULT_SCHEMA_PATTERN};
use protodox::{FilterSession, LogLevel, RunReport, Settings};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Rewrite .proto schemas as C-family declarations for documentation generators
#[derive(Debug, Parser)]
#[command(name = "protodox", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Files to filter, in order. Without any, every schema file in --directory is rewritten
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// What the diagnostic logs record: none, errors or all
    #[arg(short, long, env = "PROTODOX_LOG_LEVEL", default_value_t = LogLevel::None)]
    log_level: LogLevel,

    /// Debug log receiving every line before and after rewriting
    #[arg(
        long,
        value_name = "PATH",
        env = "PROTODOX_DEBUG_LOG",
        default_value = DEFAULT_DEBUG_LOG
    )]
    debug_log: PathBuf,

    /// Error log receiving inputs that could not be read
    #[arg(
        long,
        value_name = "PATH",
        env = "PROTODOX_ERROR_LOG",
        default_value = DEFAULT_ERROR_LOG
    )]
    error_log: PathBuf,

    /// Glob selecting schema files by name; other files are copied unchanged
    #[arg(short, long, value_name = "GLOB", default_value = DEFAULT_SCHEMA_PATTERN)]
    pattern: String,

    /// Directory searched when no files are given
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    directory: PathBuf,
}

const AFTER_HELP: &str = "\
DOXYGEN:
  FILE_PATTERNS = *.proto
  INPUT_FILTER  = protodox

EXAMPLES:
  protodox api.proto                  # rewritten schema on stdout
  protodox notes.txt                  # non-schema files are copied as is
  protodox -C protos                  # every *.proto in ./protos
  protodox -l errors api.proto        # record unreadable inputs in protodox.error.log
";

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::new()
            .with_log_level(self.log_level)
            .with_debug_log(&self.debug_log)
            .with_error_log(&self.error_log)
            .with_schema_pattern(&self.pattern);
        if let Some(name) = own_file_name() {
            settings = settings.with_self_name(name);
        }
        settings
    }
}

fn own_file_name() -> Option<std::ffi::OsString> {
    let exe = std::env::current_exe().ok()?;
    exe.file_name().map(ToOwned::to_owned)
}

fn run(cli: &Cli) -> anyhow::Result<RunReport> {
    let mut session =
        FilterSession::new(cli.settings()).context("invalid filter configuration")?;

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());

    let report = if cli.files.is_empty() {
        tracing::debug!("No inputs given, discovering in {}", cli.directory.display());
        session.run_discovered(&cli.directory, out)?
    } else {
        session.run(&cli.files, out)?
    };
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Standard output carries the filtered text, so tracing goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(report) => {
            if !report.is_clean() {
                tracing::warn!(
                    "{} of {} inputs could not be read",
                    report.failures.len(),
                    report.inputs()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["protodox"]).expect("parse");
        assert!(cli.files.is_empty());
        assert_eq!(cli.log_level, LogLevel::None);
        assert_eq!(cli.pattern, "*.proto");
        assert_eq!(cli.directory, PathBuf::from("."));
    }

    #[test]
    fn test_settings_from_args() {
        let cli = Cli::try_parse_from([
            "protodox",
            "--log-level",
            "all",
            "--debug-log",
            "d.log",
            "--error-log",
            "e.log",
            "--pattern",
            "*.idl",
            "a.idl",
        ])
        .expect("parse");
        let settings = cli.settings();
        assert_eq!(settings.log_level(), LogLevel::All);
        assert_eq!(settings.debug_log(), std::path::Path::new("d.log"));
        assert_eq!(settings.error_log(), std::path::Path::new("e.log"));
        assert_eq!(settings.schema_pattern(), "*.idl");
        assert_eq!(cli.files, vec![PathBuf::from("a.idl")]);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["protodox", "--log-level", "loud"]).is_err());
    }
}

//! Input classification and discovery.
//!
//! Decides what happens to each input by its file name: schema files are
//! rewritten, the tool's own file is skipped, everything else is copied.

use crate::config::Settings;
use crate::error::{FilterError, Result};
use globset::{Glob, GlobMatcher};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// What to do with one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Matches the schema pattern; rewritten.
    Schema,
    /// Any other file; copied verbatim.
    Passthrough,
    /// The tool itself; skipped.
    SelfIdentity,
}

/// Classifies inputs by file name.
#[derive(Debug, Clone)]
pub struct InputClassifier {
    matcher: GlobMatcher,
    self_name: Option<OsString>,
}

impl InputClassifier {
    /// Compiles the schema pattern from `settings`.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidPattern` if the pattern is not a valid glob.
    pub fn new(settings: &Settings) -> Result<Self> {
        let pattern = settings.schema_pattern();
        let glob = Glob::new(pattern).map_err(|e| FilterError::invalid_pattern(pattern, e))?;
        Ok(Self {
            matcher: glob.compile_matcher(),
            self_name: settings.self_name().cloned(),
        })
    }

    /// Classifies `path` by its final component.
    #[must_use]
    pub fn classify(&self, path: &Path) -> InputKind {
        let Some(name) = path.file_name() else {
            return InputKind::Passthrough;
        };
        if self.self_name.as_deref() == Some(name) {
            InputKind::SelfIdentity
        } else if self.matcher.is_match(name) {
            InputKind::Schema
        } else {
            InputKind::Passthrough
        }
    }
}

/// Lists the schema files directly inside `dir`, sorted by path.
///
/// # Errors
/// Returns `FilterError::Discovery` if the directory cannot be read.
pub fn discover(dir: &Path, classifier: &InputClassifier) -> Result<Vec<PathBuf>> {
    let discovery_error = |source| FilterError::Discovery {
        dir: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        let path = entry.path();
        if path.is_file() && classifier.classify(&path) == InputKind::Schema {
            found.push(path);
        }
    }
    found.sort();

    tracing::debug!("Discovered {} schema files in {}", found.len(), dir.display());
    Ok(found)
}

/// Copies the file at `path` to `out` unchanged, line by line.
///
/// Returns the number of lines copied.
///
/// # Errors
/// Returns `Error::Open` or `Error::Read` for input problems and
/// `Error::Write` for output problems.
pub fn copy_verbatim<W: Write>(path: &Path, mut out: W) -> protodox_core::Result<usize> {
    use protodox_core::Error;

    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    let mut lines = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).map_err(Error::Read)? == 0 {
            break;
        }
        out.write_all(&line).map_err(Error::Write)?;
        lines += 1;
    }
    out.flush().map_err(Error::Write)?;

    Ok(lines)
}

//! Stream driver.
//!
//! Feeds the lines of one file through a [`LineRewriter`] and writes the
//! result to a sink as it goes. Every call to [`StreamDriver::run`] is its
//! own session with a fresh enum context.

use crate::error::{Error, Result};
use crate::rewriter::{LineRewriter, Rewrite};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Observer notified for every rewritten line.
pub trait LineObserver {
    /// Called once per input line, before its output is written.
    ///
    /// # Arguments
    /// * `line_number` - 1-based line number within the session
    /// * `before` - Input line without its line ending
    /// * `after` - Rewritten output
    fn on_line(&mut self, line_number: usize, before: &str, after: &Rewrite);

    /// Called when a session starts.
    fn on_session_start(&mut self) {}

    /// Called when a session ends.
    fn on_session_end(&mut self, _stats: &TransformStats) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LineObserver for NoopObserver {
    fn on_line(&mut self, _line_number: usize, _before: &str, _after: &Rewrite) {}
}

impl<O: LineObserver + ?Sized> LineObserver for &mut O {
    fn on_line(&mut self, line_number: usize, before: &str, after: &Rewrite) {
        (**self).on_line(line_number, before, after);
    }

    fn on_session_start(&mut self) {
        (**self).on_session_start();
    }

    fn on_session_end(&mut self, stats: &TransformStats) {
        (**self).on_session_end(stats);
    }
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Input lines consumed.
    pub lines_read: usize,
    /// Output lines written.
    pub lines_written: usize,
    /// Trailing comments moved above their code line.
    pub hoisted_comments: usize,
    /// The input ended while an enum body was still open.
    pub ended_inside_enum: bool,
}

/// Drives the rewriter over whole files.
#[derive(Debug, Default)]
pub struct StreamDriver<O = NoopObserver> {
    observer: O,
}

impl StreamDriver {
    /// Creates a driver without an observer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observer: NoopObserver,
        }
    }
}

impl<O: LineObserver> StreamDriver<O> {
    /// Creates a driver reporting to `observer`.
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Returns the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consumes the driver and returns the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Rewrites every line of `reader` into `writer`, in order.
    ///
    /// # Errors
    /// Returns `Error::Read` if reading fails and `Error::Write` if writing fails.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<TransformStats> {
        let mut rewriter = LineRewriter::new();
        let mut stats = TransformStats::default();
        let mut raw = Vec::new();

        tracing::debug!("Rewrite session started");
        self.observer.on_session_start();

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw).map_err(Error::Read)? == 0 {
                break;
            }
            let line = decode_line(&raw);
            stats.lines_read += 1;

            let rewrite = rewriter.rewrite(&line);
            tracing::trace!(
                line = stats.lines_read,
                "{:?} -> {:?}",
                line,
                rewrite.to_string()
            );
            self.observer.on_line(stats.lines_read, &line, &rewrite);

            for out in rewrite.lines() {
                writer.write_all(out.as_bytes()).map_err(Error::Write)?;
                writer.write_all(b"\n").map_err(Error::Write)?;
                stats.lines_written += 1;
            }
            if rewrite.hoisted.is_some() {
                stats.hoisted_comments += 1;
            }
        }
        writer.flush().map_err(Error::Write)?;

        stats.ended_inside_enum = rewriter.context().is_inside();
        if stats.ended_inside_enum {
            tracing::warn!(
                "Input ended inside an enum body after {} lines",
                stats.lines_read
            );
        }
        tracing::debug!(
            "Rewrite session finished: {} lines in, {} lines out",
            stats.lines_read,
            stats.lines_written
        );
        self.observer.on_session_end(&stats);

        Ok(stats)
    }

    /// Opens `path` and rewrites it into `writer`.
    ///
    /// # Errors
    /// Returns `Error::Open` if the file cannot be opened, otherwise as
    /// [`StreamDriver::run`].
    pub fn run_file<W: Write>(&mut self, path: &Path, writer: W) -> Result<TransformStats> {
        let file = File::open(path).map_err(|e| Error::open(path, e))?;
        self.run(BufReader::new(file), writer)
    }
}

/// Strips the line ending and decodes the bytes, replacing invalid UTF-8.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let mut end = raw.len();
    if raw[..end].ends_with(b"\n") {
        end -= 1;
    }
    if raw[..end].ends_with(b"\r") {
        end -= 1;
    }
    String::from_utf8_lossy(&raw[..end])
}

/// Rewrites a whole document held in memory.
#[must_use]
pub fn transform_str(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len() + input.len() / 8);
    // Reading from a slice and writing to a Vec cannot fail.
    let _ = StreamDriver::new().run(input.as_bytes(), &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

/// Rewrites the file at `path` into `writer`.
///
/// # Errors
/// Returns `Error::Open` if the file cannot be opened, otherwise as
/// [`StreamDriver::run`].
pub fn transform_file<W: Write>(path: &Path, writer: W) -> Result<TransformStats> {
    StreamDriver::new().run_file(path, writer)
}

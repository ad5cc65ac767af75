//! Line rewriting.
//!
//! Turns one line of `.proto` text into one or two lines of C-family
//! declarations. Decisions are taken on the [`Findings`] of the original
//! line; edits are applied to the evolving buffer.

use crate::context::EnumContext;
use crate::markers::{
    BLOCK_CLOSE, COMMENT, DOC_COMMENT, Findings, LIST_SEPARATOR, MESSAGE_KEYWORD, STRUCT_KEYWORD,
    TERMINATOR, find_keyword,
};
use std::fmt;

/// Output produced for a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Trailing comment moved above the code it annotates.
    pub hoisted: Option<String>,
    /// The rewritten line itself.
    pub line: String,
}

impl Rewrite {
    /// Output lines in emission order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.hoisted
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.line.as_str()))
    }

    /// Number of output lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        if self.hoisted.is_some() { 2 } else { 1 }
    }

    /// Returns true if the rewrite left the input untouched.
    #[must_use]
    pub fn is_identity(&self, input: &str) -> bool {
        self.hoisted.is_none() && self.line == input
    }
}

impl fmt::Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hoisted) = &self.hoisted {
            writeln!(f, "{hoisted}")?;
        }
        f.write_str(&self.line)
    }
}

/// Rewrites one line.
///
/// `context` must already reflect whether this line opens an enum
/// (see [`EnumContext::observe_entry`]); closing the enum happens here.
///
/// The steps run in a fixed order: comment emphasis, comment hoist, enum
/// terminator substitution, block-close decoration, keyword substitution.
#[must_use]
pub fn rewrite_line(line: &str, findings: &Findings, context: &mut EnumContext) -> Rewrite {
    let mut buffer = match findings.comment {
        Some(offset) => emphasize_comment(line, offset),
        None => line.to_string(),
    };

    let mut hoisted = None;
    if findings.terminator_precedes_comment() {
        // Everything after the first terminator moves up, comment included.
        if let Some((head, tail)) = buffer.split_once(TERMINATOR) {
            hoisted = Some(tail.to_string());
            buffer = format!("{head}{TERMINATOR}");
        }
    }

    if context.is_inside() {
        if let Some(offset) = buffer.find(TERMINATOR) {
            let mut separator = [0; 4];
            buffer.replace_range(
                offset..offset + TERMINATOR.len_utf8(),
                LIST_SEPARATOR.encode_utf8(&mut separator),
            );
        }
    }

    if findings.block_close.is_some() {
        if context.should_exit(findings) {
            context.leave();
        } else if let Some(offset) = buffer.find(BLOCK_CLOSE) {
            buffer.insert(offset + BLOCK_CLOSE.len_utf8(), TERMINATOR);
        }
    }

    if findings.declares_message() {
        if let Some(offset) = find_keyword(&buffer, MESSAGE_KEYWORD) {
            buffer = format!(
                "{STRUCT_KEYWORD}{}{}",
                &buffer[..offset],
                &buffer[offset + MESSAGE_KEYWORD.len()..]
            );
        }
    }

    Rewrite {
        hoisted,
        line: buffer,
    }
}

fn emphasize_comment(line: &str, offset: usize) -> String {
    let mut out = String::with_capacity(line.len() + 1);
    out.push_str(&line[..offset]);
    out.push_str(DOC_COMMENT);
    out.push_str(&line[offset + COMMENT.len()..]);
    out
}

/// Rewriter bound to the enum context of a single file session.
#[derive(Debug, Default)]
pub struct LineRewriter {
    context: EnumContext,
}

impl LineRewriter {
    /// Creates a rewriter outside of any enum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies, updates the enum context and rewrites one line.
    pub fn rewrite(&mut self, line: &str) -> Rewrite {
        let findings = Findings::classify(line);
        self.context.observe_entry(&findings);
        rewrite_line(line, &findings, &mut self.context)
    }

    /// Current enum context.
    #[must_use]
    pub fn context(&self) -> EnumContext {
        self.context
    }
}

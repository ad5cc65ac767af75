//! Line classification.
//!
//! Locates the first occurrence of every marker the rewriter cares about.
//! Matching is purely textual: a marker inside a quoted string is found
//! like any other occurrence.

/// Comment start in the schema language.
pub const COMMENT: &str = "//";
/// Documentation comment marker understood by the documentation tool.
pub const DOC_COMMENT: &str = "///";
/// Statement terminator.
pub const TERMINATOR: char = ';';
/// Separator between enum members in the target dialect.
pub const LIST_SEPARATOR: char = ',';
/// Block-closing marker.
pub const BLOCK_CLOSE: char = '}';
/// Enumeration keyword.
pub const ENUM_KEYWORD: &str = "enum";
/// Aggregate-type keyword in the schema language.
pub const MESSAGE_KEYWORD: &str = "message";
/// Aggregate-type keyword in the target dialect.
pub const STRUCT_KEYWORD: &str = "struct";

/// Byte offsets of the first occurrence of each marker in one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Findings {
    /// Offset of the first `//`.
    pub comment: Option<usize>,
    /// Offset of the first bare `enum` word.
    pub enum_keyword: Option<usize>,
    /// Offset of the first bare `message` word.
    pub message_keyword: Option<usize>,
    /// Offset of the first `;`.
    pub terminator: Option<usize>,
    /// Offset of the first `}`.
    pub block_close: Option<usize>,
}

impl Findings {
    /// Classifies a single line of input.
    #[must_use]
    pub fn classify(line: &str) -> Self {
        Self {
            comment: line.find(COMMENT),
            enum_keyword: find_keyword(line, ENUM_KEYWORD),
            message_keyword: find_keyword(line, MESSAGE_KEYWORD),
            terminator: line.find(TERMINATOR),
            block_close: line.find(BLOCK_CLOSE),
        }
    }

    /// Returns true if `offset` lies before the comment start, or the line has no comment.
    #[must_use]
    pub fn before_comment(&self, offset: usize) -> bool {
        self.comment.is_none_or(|comment| offset < comment)
    }

    /// Returns true if the line opens an enum body outside of any comment.
    #[must_use]
    pub fn enters_enum(&self) -> bool {
        self.enum_keyword
            .is_some_and(|offset| self.before_comment(offset))
    }

    /// Returns true if the line declares a message outside of any comment.
    #[must_use]
    pub fn declares_message(&self) -> bool {
        self.message_keyword
            .is_some_and(|offset| self.before_comment(offset))
    }

    /// Returns true if a terminator is followed by a trailing comment.
    #[must_use]
    pub fn terminator_precedes_comment(&self) -> bool {
        match (self.terminator, self.comment) {
            (Some(terminator), Some(comment)) => terminator < comment,
            _ => false,
        }
    }

    /// Returns true if no marker was found at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Finds the first occurrence of `keyword` as a bare word.
///
/// An occurrence counts only when it is not glued to identifier characters
/// on either side, so `MyEnum` or `messages` never match.
#[must_use]
pub fn find_keyword(text: &str, keyword: &str) -> Option<usize> {
    text.match_indices(keyword)
        .map(|(offset, _)| offset)
        .find(|&offset| {
            let before = text[..offset].chars().next_back();
            let after = text[offset + keyword.len()..].chars().next();
            !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
        })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

//! # protodox Core
//!
//! Line-oriented rewriting of `.proto` schema text into C-family
//! declarations that a documentation generator can parse.
//!
//! This crate provides:
//! - Line classification (first offsets of comment, keyword and punctuation markers)
//! - Enum-context tracking across the lines of one file
//! - The line rewriter (comment emphasis and hoisting, enum lists, block
//!   terminators, `message` to `struct`)
//! - A stream driver that rewrites whole files line by line
//!
//! There is no grammar here. Every decision is taken on a single line plus
//! one bit of state, so markers inside string literals are treated like
//! any other text.
//!
//! ```
//! use protodox_core::transform_str;
//!
//! let out = transform_str("message Foo { // a foo\n}\n");
//! assert_eq!(out, "struct Foo { /// a foo\n};\n");
//! ```

pub mod context;
pub mod driver;
pub mod error;
pub mod markers;
pub mod rewriter;

pub use context::EnumContext;
pub use driver::{
    LineObserver, NoopObserver, StreamDriver, TransformStats, transform_file, transform_str,
};
pub use error::{Error, Result};
pub use markers::Findings;
pub use rewriter::{LineRewriter, Rewrite, rewrite_line};

//! # protodox
//!
//! Documentation-generator input filter for Protocol Buffers `.proto` files.
//!
//! Documentation generators such as Doxygen understand C-family sources but
//! not `.proto` schemas. protodox rewrites schemas line by line into
//! something they can read: `message` becomes `struct`, enum members become
//! a comma-separated list, closed messages get a trailing `;`, and comments
//! become documentation comments placed above the declaration they describe.
//! Any other file is passed through unchanged.
//!
//! ## Using it with Doxygen
//!
//! ```text
//! FILE_PATTERNS = *.proto
//! INPUT_FILTER  = protodox
//! ```
//!
//! Doxygen invokes the filter once per file with the path as the only
//! argument and reads the rewritten text from standard output. Run without
//! arguments, `protodox` rewrites every `*.proto` file in the current
//! directory.
//!
//! ## Quick Start
//!
//! ```
//! use protodox::prelude::*;
//!
//! let out = transform_str("enum Color {\n  RED = 0; // warm\n}\n");
//! assert_eq!(out, "enum Color {\n /// warm\n  RED = 0,\n}\n");
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Line classification, enum tracking, rewriting, stream driver
//! - [`filter`] - Settings, input dispatch, discovery, diagnostic logs

pub mod prelude;

/// The line-oriented rewriting engine.
pub mod core {
    pub use protodox_core::*;
}

/// File-level dispatch and diagnostics.
pub mod filter {
    pub use protodox_filter::*;
}

// Re-export commonly used items at the crate root
pub use protodox_core::{LineRewriter, Rewrite, StreamDriver, transform_file, transform_str};
pub use protodox_filter::{FilterSession, LogLevel, RunReport, Settings};

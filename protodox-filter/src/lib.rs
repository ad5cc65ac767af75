//! # protodox Filter
//!
//! File-level plumbing around the protodox rewriting engine.
//!
//! This crate provides:
//! - Immutable run settings (schema pattern, diagnostic log level and paths)
//! - Input classification: schema files, passthrough files, the tool itself
//! - Discovery of schema files in a directory
//! - Optional diagnostic logs of every rewritten line and every failure
//! - [`FilterSession`], which runs a batch of inputs and reports the outcome

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod session;

pub use config::{LogLevel, ParseLogLevelError, Settings};
pub use diagnostics::Diagnostics;
pub use error::{FilterError, Result};
pub use input::{InputClassifier, InputKind, copy_verbatim, discover};
pub use session::{FilterSession, InputFailure, RunReport};

//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use protodox::prelude::*;
//! ```

// Engine types
pub use protodox_core::error::{Error as CoreError, Result as CoreResult};
pub use protodox_core::{
    EnumContext, Findings, LineObserver, LineRewriter, NoopObserver, Rewrite, StreamDriver,
    TransformStats, rewrite_line, transform_file, transform_str,
};

// Filter types
pub use protodox_filter::{
    Diagnostics, FilterError, FilterSession, InputClassifier, InputFailure, InputKind, LogLevel,
    RunReport, Settings,
};

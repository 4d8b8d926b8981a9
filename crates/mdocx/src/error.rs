//! Error types for mdocx operations.
//!
//! This module provides the main error type [`MdocxError`] which wraps the
//! error conditions that can occur while discovering and converting
//! documents. Per-block diagram rendering failures are deliberately not
//! represented here: they are recoverable and surface as warnings while the
//! block is kept as raw source text.

use std::io;

use thiserror::Error;

use crate::convert::ConvertError;

/// The main error type for mdocx operations.
///
/// Conversion failures carry the exit status and captured stderr of the
/// external converter so the CLI can report what the tool printed.
#[derive(Debug, Error)]
pub enum MdocxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Document conversion failed: {0}")]
    Convert(#[from] ConvertError),
}

impl MdocxError {
    /// Create a new `Pattern` error for the given glob pattern.
    pub fn new_pattern_error(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }
}

//! Parse error types.

use thiserror::Error;

/// Errors that can occur during parsing.
///
/// Line-level parsing never fails; only document-level policies do.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A non-blank line appeared before the first question heading.
    #[error("Line {line} is not part of any question: {text:?}")]
    OrphanLine {
        /// Line number (1-indexed).
        line: usize,
        /// The offending line.
        text: String,
    },
}

impl ParseError {
    /// Creates an orphan line error from a 0-indexed paragraph index.
    pub fn orphan_line(index: usize, text: impl Into<String>) -> Self {
        Self::OrphanLine {
            line: index + 1,
            text: text.into(),
        }
    }
}

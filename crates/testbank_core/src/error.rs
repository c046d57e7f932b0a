//! Core error types.

use thiserror::Error;

use testbank_parser::ParseError;

/// Errors raised by a document when an edit cannot be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The offset lies past the end of the document.
    #[error("Offset {offset} is out of range (document length {len})")]
    OutOfRange { offset: usize, len: usize },

    /// The offset splits a multi-byte character.
    #[error("Offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    /// The range starts after it ends.
    #[error("Invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },
}

/// Errors that can occur while editing or serializing a test.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Forward serialization produced nothing to save.
    #[error("no questions found")]
    NoQuestions,

    /// A save was requested while another one is still running.
    #[error("A save is already in progress")]
    SaveInProgress,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document edit error.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

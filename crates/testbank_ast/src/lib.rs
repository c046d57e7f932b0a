//! # testbank_ast
//!
//! Data types for the Test Bank authoring format.
//!
//! A test is written as plain paragraphs, one per line:
//!
//! ```text
//! Question 1: What is 2+2?
//! A. Three
//! *B. Four
//! ```
//!
//! This crate holds the shapes those paragraphs are parsed into. Nothing here
//! is persisted: every value is re-derived from the live document on each
//! change.
//!
//! ## Example
//!
//! ```rust
//! use testbank_ast::{Line, Span};
//!
//! let line = Line::new(0, Span::new(0, 8), "A. Three");
//! assert!(!line.is_blank());
//! ```

mod line;
mod span;

pub use line::{
    CORRECT_MARKER, ChoiceLine, Line, LineKind, ParsedChoice, QuestionBlock, UNKNOWN_LABEL,
};
pub use span::Span;

//! # testbank_parser
//!
//! Parsing for Test Bank documents.
//!
//! This crate provides:
//! - [`classify`]: the single line tokenizer every other component uses
//! - [`extract_lines`]: the document to line model step
//! - [`BlockParser`]: segmentation of lines into question blocks
//! - [`parse_choice`] and [`heading_text`]: display parsing of block lines
//!
//! ## Example
//!
//! ```rust
//! use testbank_parser::{BlockParser, parse_choice};
//!
//! let source = "Question 1: What is 2+2?\nA. Three\n*B. Four";
//! let blocks = BlockParser::new().parse(source).unwrap();
//!
//! assert_eq!(blocks.len(), 1);
//! let correct = parse_choice(&blocks[0].lines[2].text);
//! assert!(correct.starred);
//! ```

mod choice;
mod classify;
mod error;
mod extract;
mod segment;
mod traits;

pub use choice::{heading_text, parse_choice};
pub use classify::{classify, strip_marker};
pub use error::ParseError;
pub use extract::extract_lines;
pub use segment::{BlockParser, PreamblePolicy};
pub use traits::LineSource;

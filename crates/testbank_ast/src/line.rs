//! Lines, their classification, and question blocks.

use serde::{Deserialize, Serialize};

use crate::Span;

/// Leading character that marks a choice as the correct answer.
pub const CORRECT_MARKER: char = '*';

/// Label given to a choice line whose label could not be parsed.
pub const UNKNOWN_LABEL: &str = "?";

/// One block-level paragraph of the document, flattened to plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Paragraph index in document order (0-indexed).
    pub index: usize,

    /// Byte span of the paragraph content in the flattened text.
    pub span: Span,

    /// Paragraph text without markup.
    pub text: String,
}

impl Line {
    /// Creates a new line.
    pub fn new(index: usize, span: Span, text: impl Into<String>) -> Self {
        Self {
            index,
            span,
            text: text.into(),
        }
    }

    /// Returns true if the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The classified form of a line.
///
/// Every component that needs to know what a line *is* goes through this
/// type instead of matching text patterns itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LineKind {
    /// `Question <N>: <text>`.
    Heading {
        /// The number written after `Question`.
        number: u32,
        /// Text after the colon, trimmed.
        text: String,
    },

    /// `[*]<Letter><. or )> <text>`.
    Choice(ChoiceLine),

    /// Empty or whitespace-only.
    Blank,

    /// Anything else.
    Unrecognized,
}

impl LineKind {
    /// Returns true for heading lines.
    pub const fn is_heading(&self) -> bool {
        matches!(self, LineKind::Heading { .. })
    }

    /// Returns the heading number, if this is a heading.
    pub const fn heading_number(&self) -> Option<u32> {
        match self {
            LineKind::Heading { number, .. } => Some(*number),
            _ => None,
        }
    }

    /// Returns the choice data, if this is a choice line.
    pub const fn as_choice(&self) -> Option<&ChoiceLine> {
        match self {
            LineKind::Choice(choice) => Some(choice),
            _ => None,
        }
    }
}

/// A well-formed choice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceLine {
    /// Label letter, normalized to uppercase.
    pub label: char,
    /// Punctuation after the letter as written (`.` or `)`).
    pub punctuation: char,
    /// Text after the label.
    pub text: String,
    /// Whether the line starts with the correctness marker.
    pub starred: bool,
}

/// Display data for one choice line.
///
/// Unlike [`ChoiceLine`] this is total: a line that does not look like a
/// choice still produces a value, with `label` set to [`UNKNOWN_LABEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChoice {
    /// The line as it appears in the document.
    pub raw: String,
    /// Single uppercase letter, or `"?"`.
    pub label: String,
    /// Body text after the label and punctuation.
    pub text: String,
    /// Whether the line starts with the correctness marker.
    pub starred: bool,
}

impl ParsedChoice {
    /// Returns true if the label could not be parsed.
    pub fn is_unlabeled(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }
}

/// A heading line and the lines that follow it up to the next heading.
///
/// Line 0 is the heading. A block built from lines that precede the first
/// heading has no proper heading but still treats its first line as
/// line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBlock {
    /// Lines of the block in document order. Never empty.
    pub lines: Vec<Line>,

    /// Whether line 0 matches the heading pattern.
    pub has_heading: bool,
}

impl QuestionBlock {
    /// Creates a block starting at a heading line.
    pub fn with_heading(heading: Line) -> Self {
        Self {
            lines: vec![heading],
            has_heading: true,
        }
    }

    /// Creates a block for lines that precede the first heading.
    pub fn implicit(first: Line) -> Self {
        Self {
            lines: vec![first],
            has_heading: false,
        }
    }

    /// Returns the first line of the block.
    pub fn first(&self) -> &Line {
        &self.lines[0]
    }

    /// Returns the heading line, or `None` for an implicit block.
    pub fn heading(&self) -> Option<&Line> {
        if self.has_heading {
            self.lines.first()
        } else {
            None
        }
    }

    /// Returns the lines after line 0.
    pub fn choice_lines(&self) -> &[Line] {
        &self.lines[1..]
    }

    /// Returns the number of lines in the block.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: a block holds at least its first line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a line to the block.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }
}

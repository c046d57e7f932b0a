//! The editor document.
//!
//! Every component reads and writes the document through [`EditorDocument`].
//! Offsets are byte offsets into the flattened text, where paragraphs are
//! joined by a single `\n`.

use testbank_ast::Span;
use testbank_parser::LineSource;

use crate::DocumentError;

/// The operations the editor environment exposes on its document.
pub trait EditorDocument: LineSource {
    /// Returns the cursor offset in the flattened text.
    fn selection(&self) -> usize;

    /// Splits the current paragraph at the cursor and inserts `paragraphs`
    /// after the text before the cursor.
    ///
    /// The text after the cursor becomes a following paragraph if it is
    /// non-empty. The cursor ends up at the end of the last inserted
    /// paragraph.
    fn insert_paragraphs_at_cursor(&mut self, paragraphs: &[String]) -> Result<(), DocumentError>;

    /// Replaces a range of the flattened text with `paragraphs`.
    fn replace_range(&mut self, span: Span, paragraphs: &[String]) -> Result<(), DocumentError>;

    /// Moves the cursor.
    fn set_selection(&mut self, offset: usize) -> Result<(), DocumentError>;

    /// Returns the text of the cursor's paragraph up to the cursor.
    fn text_before_cursor(&self) -> String {
        let cursor = self.selection();
        let mut start = 0;
        for text in self.paragraph_texts() {
            let end = start + text.len();
            if cursor <= end {
                return text.get(..cursor - start).unwrap_or(text).to_string();
            }
            start = end + 1;
        }
        String::new()
    }
}

/// A plain-text document held as a list of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    paragraphs: Vec<String>,
    cursor: usize,
}

impl TextDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from `\n`-separated text with the cursor at the
    /// start. An empty string yields a document with no paragraphs.
    pub fn from_text(text: &str) -> Self {
        Self::from_paragraphs(text.paragraph_texts())
    }

    /// Creates a document from individual paragraphs.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new();
        for paragraph in paragraphs {
            let paragraph: String = paragraph.into();
            doc.paragraphs
                .extend(paragraph.split('\n').map(str::to_string));
        }
        doc
    }

    /// Returns the paragraphs.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Returns the flattened text.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// Returns the length of the flattened text in bytes.
    pub fn len(&self) -> usize {
        let bytes: usize = self.paragraphs.iter().map(String::len).sum();
        bytes + self.paragraphs.len().saturating_sub(1)
    }

    /// Returns true if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Moves the cursor to the end of the document.
    pub fn move_to_end(&mut self) {
        self.cursor = self.len();
    }

    /// Byte offset at which paragraph `index` starts.
    fn paragraph_start(&self, index: usize) -> usize {
        self.paragraphs[..index]
            .iter()
            .map(|p| p.len() + 1)
            .sum()
    }

    /// Finds the paragraph containing `offset` and the offset inside it.
    fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            let end = start + paragraph.len();
            if offset <= end {
                return Some((index, offset - start));
            }
            start = end + 1;
        }
        None
    }

    fn split_into_paragraphs(paragraphs: &[String]) -> Vec<String> {
        paragraphs
            .iter()
            .flat_map(|p| p.split('\n'))
            .map(str::to_string)
            .collect()
    }
}

impl LineSource for TextDocument {
    fn paragraph_texts(&self) -> Vec<&str> {
        self.paragraphs.iter().map(String::as_str).collect()
    }
}

impl EditorDocument for TextDocument {
    fn selection(&self) -> usize {
        self.cursor
    }

    fn insert_paragraphs_at_cursor(&mut self, paragraphs: &[String]) -> Result<(), DocumentError> {
        let inserted = Self::split_into_paragraphs(paragraphs);
        if inserted.is_empty() {
            return Ok(());
        }

        let count = inserted.len();
        let last_len = inserted[count - 1].len();

        if self.paragraphs.is_empty() {
            self.paragraphs = inserted;
            self.cursor = self.paragraph_start(count - 1) + last_len;
            return Ok(());
        }

        let (index, at) = self.locate(self.cursor).ok_or(DocumentError::OutOfRange {
            offset: self.cursor,
            len: self.len(),
        })?;

        let after = self.paragraphs[index].split_off(at);
        let mut tail = inserted;
        if !after.is_empty() {
            tail.push(after);
        }
        self.paragraphs.splice(index + 1..index + 1, tail);

        let last = index + count;
        self.cursor = self.paragraph_start(last) + last_len;
        Ok(())
    }

    fn replace_range(&mut self, span: Span, paragraphs: &[String]) -> Result<(), DocumentError> {
        let text = self.text();
        let range = span.range();

        if range.start > range.end {
            return Err(DocumentError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > text.len() {
            return Err(DocumentError::OutOfRange {
                offset: range.end,
                len: text.len(),
            });
        }
        for offset in [range.start, range.end] {
            if !text.is_char_boundary(offset) {
                return Err(DocumentError::NotCharBoundary { offset });
            }
        }

        let replacement = paragraphs.join("\n");
        let mut updated = String::with_capacity(text.len() + replacement.len());
        updated.push_str(&text[..range.start]);
        updated.push_str(&replacement);
        updated.push_str(&text[range.end..]);

        if self.cursor >= range.end {
            self.cursor = self.cursor - range.end + range.start + replacement.len();
        } else if self.cursor > range.start {
            self.cursor = range.start + replacement.len();
        }

        self.paragraphs = if updated.is_empty() && self.paragraphs.is_empty() {
            Vec::new()
        } else {
            updated.split('\n').map(str::to_string).collect()
        };
        Ok(())
    }

    fn set_selection(&mut self, offset: usize) -> Result<(), DocumentError> {
        let len = self.len();
        if offset > len {
            return Err(DocumentError::OutOfRange { offset, len });
        }
        if let Some((index, at)) = self.locate(offset)
            && !self.paragraphs[index].is_char_boundary(at)
        {
            return Err(DocumentError::NotCharBoundary { offset });
        }
        self.cursor = offset;
        Ok(())
    }
}

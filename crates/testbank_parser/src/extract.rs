//! Line model extraction.

use testbank_ast::{Line, Span};

use crate::LineSource;

/// Converts a document into its ordered list of lines.
///
/// Each line records its paragraph index and its byte span in the
/// flattened text, where paragraphs are joined by a single `\n`. The result
/// depends only on the paragraph texts, so calling this twice without an
/// intervening edit yields equal output.
pub fn extract_lines<S>(source: &S) -> Vec<Line>
where
    S: LineSource + ?Sized,
{
    let paragraphs = source.paragraph_texts();
    let mut lines = Vec::with_capacity(paragraphs.len());
    let mut offset = 0u32;

    for (index, text) in paragraphs.into_iter().enumerate() {
        let end = offset + text.len() as u32;
        lines.push(Line::new(index, Span::new(offset, end), text));
        // Separator between paragraphs.
        offset = end + 1;
    }

    lines
}

//! Correctness marker toggling.

use testbank_ast::{CORRECT_MARKER, Line};
use testbank_parser::{BlockParser, LineSource};
use tracing::debug;

use crate::{CoreError, EditorDocument};

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The paragraph was rewritten.
    Changed,
    /// The paragraph already had the requested state.
    Unchanged,
    /// No paragraph exists at the requested position.
    NotFound,
}

/// Returns `text` with the correctness marker added or removed.
///
/// Leading indentation is kept. Adding to a starred line and removing from
/// an unstarred line return the text unchanged.
pub fn set_marker(text: &str, starred: bool) -> String {
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];

    match (starred, body.strip_prefix(CORRECT_MARKER)) {
        (true, Some(_)) | (false, None) => text.to_string(),
        (true, None) => format!("{indent}{CORRECT_MARKER}{body}"),
        (false, Some(rest)) => format!("{indent}{rest}"),
    }
}

/// Finds paragraph `choice_index + 1` of block `question_index`.
///
/// Returns `None` when either index is out of range or the document does
/// not segment under the parser's preamble policy.
pub(crate) fn locate_choice<S>(
    source: &S,
    parser: &BlockParser,
    question_index: usize,
    choice_index: usize,
) -> Option<Line>
where
    S: LineSource + ?Sized,
{
    let blocks = match parser.parse(source) {
        Ok(blocks) => blocks,
        Err(e) => {
            debug!(error = %e, "Document does not segment, toggle skipped");
            return None;
        }
    };

    let line = choice_index
        .checked_add(1)
        .and_then(|paragraph| blocks.get(question_index)?.lines.get(paragraph))
        .cloned();
    if line.is_none() {
        debug!(question_index, choice_index, "Toggle target not found");
    }
    line
}

/// Sets or clears the marker on choice `choice_index` of block
/// `question_index`.
///
/// Block positions are recomputed from the document on every call. The
/// target is paragraph `choice_index + 1` of the block; only that
/// paragraph's text is replaced.
pub fn toggle_choice<D>(
    doc: &mut D,
    parser: &BlockParser,
    question_index: usize,
    choice_index: usize,
    starred: bool,
) -> Result<ToggleOutcome, CoreError>
where
    D: EditorDocument + ?Sized,
{
    let Some(line) = locate_choice(&*doc, parser, question_index, choice_index) else {
        return Ok(ToggleOutcome::NotFound);
    };

    let updated = set_marker(&line.text, starred);
    if updated == line.text {
        return Ok(ToggleOutcome::Unchanged);
    }

    doc.replace_range(line.span, &[updated])?;
    Ok(ToggleOutcome::Changed)
}

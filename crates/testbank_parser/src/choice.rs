//! Display parsing of block lines.

use testbank_ast::{LineKind, ParsedChoice, UNKNOWN_LABEL};

use crate::classify::{classify, strip_heading_prefix, strip_marker};

/// Parses one non-heading line of a block into display data.
///
/// Never fails: a line without a recognizable label keeps its
/// marker-stripped text and gets the label `"?"`.
pub fn parse_choice(line: &str) -> ParsedChoice {
    match classify(line) {
        LineKind::Choice(choice) => ParsedChoice {
            raw: line.to_string(),
            label: choice.label.to_string(),
            text: choice.text,
            starred: choice.starred,
        },
        _ => {
            let (starred, rest) = strip_marker(line.trim());
            ParsedChoice {
                raw: line.to_string(),
                label: UNKNOWN_LABEL.to_string(),
                text: rest.to_string(),
                starred,
            }
        }
    }
}

/// Returns the display text of a heading line.
///
/// Strips a leading `Question <N>:` and trims. A line without the prefix is
/// returned trimmed.
pub fn heading_text(line: &str) -> String {
    strip_heading_prefix(line).to_string()
}

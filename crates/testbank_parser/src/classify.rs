//! Line classification.
//!
//! Headings, choice labels and the correctness marker are recognized here
//! and nowhere else.

use std::sync::LazyLock;

use regex::Regex;
use testbank_ast::{CORRECT_MARKER, ChoiceLine, LineKind};

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Question\s+(\d+):\s*(.*)$").expect("heading pattern must compile")
});

static CHOICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z])([.)])\s*(.*)$").expect("choice pattern must compile")
});

/// Classifies one line of the document.
///
/// Surrounding whitespace is ignored. A heading takes priority over a choice;
/// the correctness marker is only recognized in front of a choice label.
pub fn classify(text: &str) -> LineKind {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = HEADING.captures(trimmed) {
        // Absurdly long numbers saturate instead of failing the line.
        let number = caps[1].parse::<u32>().unwrap_or(u32::MAX);
        return LineKind::Heading {
            number,
            text: caps[2].trim().to_string(),
        };
    }

    let (starred, rest) = strip_marker(trimmed);
    if let Some(caps) = CHOICE.captures(rest) {
        let label = caps[1].chars().next().unwrap_or('?').to_ascii_uppercase();
        let punctuation = caps[2].chars().next().unwrap_or('.');
        return LineKind::Choice(ChoiceLine {
            label,
            punctuation,
            text: caps[3].to_string(),
            starred,
        });
    }

    LineKind::Unrecognized
}

/// Splits a leading correctness marker off `text`.
///
/// Returns whether the marker was present and the remainder with any
/// whitespace after the marker removed.
pub fn strip_marker(text: &str) -> (bool, &str) {
    match text.strip_prefix(CORRECT_MARKER) {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    }
}

/// Returns true if `text` starts with a heading prefix.
pub(crate) fn is_heading(text: &str) -> bool {
    HEADING.is_match(text.trim())
}

/// Removes a leading `Question <N>:` prefix, if any.
pub(crate) fn strip_heading_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    match HEADING.captures(trimmed) {
        Some(caps) => caps.get(2).map_or("", |m| m.as_str()),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn choice(label: char, punctuation: char, text: &str, starred: bool) -> LineKind {
        LineKind::Choice(ChoiceLine {
            label,
            punctuation,
            text: text.to_string(),
            starred,
        })
    }

    #[rstest]
    #[case::plain("Question 1: What is 2+2?", 1, "What is 2+2?")]
    #[case::lowercase("question 12: lower", 12, "lower")]
    #[case::extra_spaces("Question   3:    spaced  ", 3, "spaced")]
    #[case::bare("Question 4:", 4, "")]
    #[case::indented("   Question 5: x", 5, "x")]
    fn test_classify_heading(#[case] line: &str, #[case] number: u32, #[case] text: &str) {
        assert_eq!(
            classify(line),
            LineKind::Heading {
                number,
                text: text.to_string()
            }
        );
    }

    #[rstest]
    #[case::dot("A. foo", choice('A', '.', "foo", false))]
    #[case::paren("B) bar", choice('B', ')', "bar", false))]
    #[case::starred("*C. baz", choice('C', '.', "baz", true))]
    #[case::starred_space("*  D) qux", choice('D', ')', "qux", true))]
    #[case::lowercase("c. lower", choice('C', '.', "lower", false))]
    #[case::empty_body("A.", choice('A', '.', "", false))]
    #[case::no_space("A.foo", choice('A', '.', "foo", false))]
    fn test_classify_choice(#[case] line: &str, #[case] expected: LineKind) {
        assert_eq!(classify(line), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tab("\t")]
    fn test_classify_blank(#[case] line: &str) {
        assert_eq!(classify(line), LineKind::Blank);
    }

    #[rstest]
    #[case::single_letter("Z")]
    #[case::word("Answer below")]
    #[case::starred_heading("*Question 1: Q")]
    #[case::missing_colon("Question 1 Q")]
    #[case::two_letters("AB. nope")]
    fn test_classify_unrecognized(#[case] line: &str) {
        assert_eq!(classify(line), LineKind::Unrecognized);
    }

    #[test]
    fn test_heading_number_saturates() {
        let kind = classify("Question 99999999999999: big");
        assert_eq!(kind.heading_number(), Some(u32::MAX));
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("*A. x"), (true, "A. x"));
        assert_eq!(strip_marker("* A. x"), (true, "A. x"));
        assert_eq!(strip_marker("A. x"), (false, "A. x"));
        assert_eq!(strip_marker(""), (false, ""));
    }

    #[test]
    fn test_strip_heading_prefix() {
        assert_eq!(strip_heading_prefix("Question 2:  Why? "), "Why?");
        assert_eq!(strip_heading_prefix("  no heading  "), "no heading");
        assert!(is_heading("QUESTION 7: caps"));
        assert!(!is_heading("Questions 7: plural"));
    }
}

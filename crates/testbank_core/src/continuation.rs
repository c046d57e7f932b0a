//! Auto-continuation of structural lines on line-break.

use serde::Serialize;
use testbank_ast::LineKind;
use testbank_parser::{LineSource, classify};
use tracing::debug;

use crate::{CoreError, EditorDocument};

/// Default number of choices per question.
pub const DEFAULT_CHOICES_PER_QUESTION: u8 = 4;

/// What a handled line-break inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum LineBreakAction {
    /// `A. ` after a heading.
    FirstChoice,
    /// An empty paragraph and the next heading after the last choice.
    NextQuestion { number: u32 },
    /// The next label after a choice.
    NextChoice { label: char, punctuation: char },
}

impl LineBreakAction {
    /// Returns the paragraphs to insert at the cursor.
    pub fn paragraphs(&self) -> Vec<String> {
        match self {
            Self::FirstChoice => vec!["A. ".to_string()],
            Self::NextQuestion { number } => {
                vec![String::new(), format!("Question {number}: ")]
            }
            Self::NextChoice { label, punctuation } => {
                vec![format!("{label}{punctuation} ")]
            }
        }
    }
}

/// Rules deciding what a line-break inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    choices_per_question: u8,
}

impl Default for Continuation {
    fn default() -> Self {
        Self {
            choices_per_question: DEFAULT_CHOICES_PER_QUESTION,
        }
    }
}

impl Continuation {
    /// Creates rules for questions with `choices_per_question` choices
    /// (1 to 26).
    pub fn new(choices_per_question: u8) -> Result<Self, CoreError> {
        if !(1..=26).contains(&choices_per_question) {
            return Err(CoreError::config(format!(
                "choicesPerQuestion must be between 1 and 26, got {}",
                choices_per_question
            )));
        }
        Ok(Self {
            choices_per_question,
        })
    }

    /// Returns the number of choices per question.
    pub fn choices_per_question(&self) -> u8 {
        self.choices_per_question
    }

    /// Returns the label of the last choice.
    pub fn last_label(&self) -> char {
        char::from(b'A' + self.choices_per_question - 1)
    }

    /// Decides what to insert after `completed`.
    ///
    /// `source` is the whole document; it is only read when a new heading
    /// needs a number.
    pub fn decide<S>(&self, completed: &str, source: &S) -> Option<LineBreakAction>
    where
        S: LineSource + ?Sized,
    {
        match classify(completed) {
            LineKind::Heading { .. } => Some(LineBreakAction::FirstChoice),
            LineKind::Choice(choice) if choice.label == self.last_label() => {
                let number = max_heading_number(source).saturating_add(1);
                Some(LineBreakAction::NextQuestion { number })
            }
            LineKind::Choice(choice) if choice.label < self.last_label() => {
                Some(LineBreakAction::NextChoice {
                    label: char::from(choice.label as u8 + 1),
                    punctuation: choice.punctuation,
                })
            }
            _ => None,
        }
    }
}

/// Returns the largest heading number in `source`, or 0 when there is none.
pub fn max_heading_number<S>(source: &S) -> u32
where
    S: LineSource + ?Sized,
{
    source
        .paragraph_texts()
        .into_iter()
        .filter_map(|text| classify(text).heading_number())
        .max()
        .unwrap_or(0)
}

/// Handles a line-break keystroke.
///
/// Returns the applied action, or `None` when the default line-break should
/// run instead. A handled keystroke inserts the action's paragraphs and no
/// extra line break.
pub fn handle_line_break<D>(
    doc: &mut D,
    rules: &Continuation,
) -> Result<Option<LineBreakAction>, CoreError>
where
    D: EditorDocument + ?Sized,
{
    let completed = doc.text_before_cursor();
    let completed = completed.trim();

    let Some(action) = rules.decide(completed, &*doc) else {
        debug!(line = completed, "Line break not handled");
        return Ok(None);
    };

    debug!(line = completed, ?action, "Continuing line");
    doc.insert_paragraphs_at_cursor(&action.paragraphs())?;
    Ok(Some(action))
}

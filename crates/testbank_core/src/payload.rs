//! Conversion between the document and the backend payload.

use testbank_ast::LineKind;
use testbank_parser::{LineSource, classify};

use crate::{ChoiceData, CoreError, QuestionData, TextDocument};

/// Converts the document into questions.
///
/// A heading starts a question and each following choice line adds a
/// choice. Choice lines before the first heading and every other line are
/// dropped. Returns an empty list when there is no heading.
pub fn to_questions<S>(source: &S) -> Vec<QuestionData>
where
    S: LineSource + ?Sized,
{
    let mut questions: Vec<QuestionData> = Vec::new();

    for text in source.paragraph_texts() {
        match classify(text) {
            LineKind::Heading { text, .. } => questions.push(QuestionData {
                text,
                choices: Vec::new(),
            }),
            LineKind::Choice(choice) => {
                if let Some(question) = questions.last_mut() {
                    question.choices.push(ChoiceData {
                        text: choice.text,
                        is_correct: choice.starred,
                    });
                }
            }
            LineKind::Blank | LineKind::Unrecognized => {}
        }
    }

    questions
}

/// Like [`to_questions`], but fails with [`CoreError::NoQuestions`] when
/// the result would be empty.
pub fn to_payload<S>(source: &S) -> Result<Vec<QuestionData>, CoreError>
where
    S: LineSource + ?Sized,
{
    let questions = to_questions(source);
    if questions.is_empty() {
        return Err(CoreError::NoQuestions);
    }
    Ok(questions)
}

/// Returns the label for the choice at `position`.
///
/// Labels run from `A` to `Z`; later positions keep `Z`.
pub fn choice_label(position: usize) -> char {
    let offset = position.min(25) as u8;
    char::from(b'A' + offset)
}

/// Renders questions as document lines.
pub fn to_lines(questions: &[QuestionData]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, question) in questions.iter().enumerate() {
        lines.push(format!("Question {}: {}", i + 1, question.text));
        for (j, choice) in question.choices.iter().enumerate() {
            let marker = if choice.is_correct { "*" } else { "" };
            lines.push(format!("{marker}{}. {}", choice_label(j), choice.text));
        }
    }
    lines
}

/// Renders questions as a new document.
pub fn to_document(questions: &[QuestionData]) -> TextDocument {
    TextDocument::from_paragraphs(to_lines(questions))
}

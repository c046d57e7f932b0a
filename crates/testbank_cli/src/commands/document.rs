//! Local document commands

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use testbank_core::{
    CoreError, EditorSession, LineBreakAction, TestBankConfig, ToggleOutcome, to_payload,
};
use tracing::{error, info};

use crate::cli::OutputFormat;
use crate::output::{format_preview, format_questions, output_json};
use crate::utils::{read_document, write_document};

/// Prints the payload. Returns true when the document has no questions.
pub fn run_parse(path: &Path, format: OutputFormat) -> Result<bool> {
    let doc = read_document(path)?;

    let questions = match to_payload(&doc) {
        Ok(questions) => questions,
        Err(e @ CoreError::NoQuestions) => {
            error!("{}: {}", path.display(), e);
            return Ok(true);
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    match format {
        OutputFormat::Json => output_json(&questions)?,
        OutputFormat::Text => println!("{}", format_questions(&questions)),
    }
    Ok(false)
}

pub fn run_preview(config: &TestBankConfig, path: &Path) -> Result<bool> {
    let session = EditorSession::with_config(read_document(path)?, config).into_diagnostic()?;
    let cards = session.preview().into_diagnostic()?;

    if cards.is_empty() {
        info!("{} is empty", path.display());
    } else {
        println!("{}", format_preview(&cards));
    }
    Ok(false)
}

/// Sets or clears a marker. `question` and `choice` are 1-based.
pub fn run_toggle(
    config: &TestBankConfig,
    path: &Path,
    question: u32,
    choice: u32,
    starred: bool,
) -> Result<bool> {
    let mut session =
        EditorSession::with_config(read_document(path)?, config).into_diagnostic()?;

    let outcome = session
        .toggle_choice(
            question.saturating_sub(1) as usize,
            choice.saturating_sub(1) as usize,
            starred,
        )
        .into_diagnostic()?;

    match outcome {
        ToggleOutcome::Changed => {
            write_document(path, session.document())?;
            let verb = if starred { "Marked" } else { "Unmarked" };
            info!("{} question {} choice {}", verb, question, choice);
            Ok(false)
        }
        ToggleOutcome::Unchanged => {
            info!("Question {} choice {} is already set", question, choice);
            Ok(false)
        }
        ToggleOutcome::NotFound => {
            error!("Question {} has no choice {}", question, choice);
            Ok(true)
        }
    }
}

/// Presses Enter at the end of the document.
pub fn run_continue(config: &TestBankConfig, path: &Path) -> Result<bool> {
    let mut session =
        EditorSession::with_config(read_document(path)?, config).into_diagnostic()?;
    session.document_mut().move_to_end();

    match session.handle_line_break().into_diagnostic()? {
        Some(action) => {
            write_document(path, session.document())?;
            match action {
                LineBreakAction::FirstChoice => info!("Added choice A"),
                LineBreakAction::NextChoice { label, .. } => info!("Added choice {}", label),
                LineBreakAction::NextQuestion { number } => info!("Started question {}", number),
            }
        }
        None => info!("Nothing to continue"),
    }
    Ok(false)
}

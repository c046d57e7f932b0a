//! Editor session state.

use std::fmt::Display;

use testbank_parser::{BlockParser, parse_choice};
use tracing::warn;

use crate::continuation::{LineBreakAction, handle_line_break};
use crate::preview::{QuestionCard, build_preview};
use crate::toggle::{ToggleOutcome, locate_choice, toggle_choice};
use crate::{Continuation, CoreError, QuestionData, TestBankConfig, TextDocument, to_payload};

/// One open test in the editor.
///
/// Owns the document and the cooperative save flag. Saving is the only
/// asynchronous step; the caller runs it between [`EditorSession::begin_save`]
/// and [`EditorSession::finish_save`].
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    document: TextDocument,
    parser: BlockParser,
    continuation: Continuation,
    saving: bool,
    last_error: Option<String>,
}

impl EditorSession {
    /// Creates a session over `document` with default settings.
    pub fn new(document: TextDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Creates a session with settings taken from `config`.
    pub fn with_config(document: TextDocument, config: &TestBankConfig) -> Result<Self, CoreError> {
        Ok(Self {
            document,
            parser: config.parser(),
            continuation: config.continuation()?,
            ..Self::default()
        })
    }

    /// Replaces the parser.
    pub fn with_parser(mut self, parser: BlockParser) -> Self {
        self.parser = parser;
        self
    }

    /// Replaces the continuation rules.
    pub fn with_continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = continuation;
        self
    }

    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut TextDocument {
        &mut self.document
    }

    /// Replaces the document, for example after loading a test.
    pub fn set_document(&mut self, document: TextDocument) {
        self.document = document;
    }

    pub fn parser(&self) -> &BlockParser {
        &self.parser
    }

    /// Handles a line-break keystroke at the cursor.
    ///
    /// Returns `None` when the default line-break should run.
    pub fn handle_line_break(&mut self) -> Result<Option<LineBreakAction>, CoreError> {
        handle_line_break(&mut self.document, &self.continuation)
    }

    /// Sets or clears the marker on a choice.
    pub fn toggle_choice(
        &mut self,
        question_index: usize,
        choice_index: usize,
        starred: bool,
    ) -> Result<ToggleOutcome, CoreError> {
        toggle_choice(
            &mut self.document,
            &self.parser,
            question_index,
            choice_index,
            starred,
        )
    }

    /// Flips the marker on a choice, as a click in the preview does.
    pub fn toggle_choice_flip(
        &mut self,
        question_index: usize,
        choice_index: usize,
    ) -> Result<ToggleOutcome, CoreError> {
        let Some(line) =
            locate_choice(&self.document, &self.parser, question_index, choice_index)
        else {
            return Ok(ToggleOutcome::NotFound);
        };

        let starred = parse_choice(&line.text).starred;
        self.toggle_choice(question_index, choice_index, !starred)
    }

    /// Builds the preview cards for the current document.
    pub fn preview(&self) -> Result<Vec<QuestionCard>, CoreError> {
        let blocks = self.parser.parse(&self.document)?;
        Ok(build_preview(&blocks))
    }

    /// Serializes the document for the backend.
    pub fn payload(&self) -> Result<Vec<QuestionData>, CoreError> {
        to_payload(&self.document)
    }

    /// Returns true while a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Returns the error from the last failed save, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts a save and returns the payload to send.
    ///
    /// Fails with [`CoreError::SaveInProgress`] while another save runs, and
    /// with [`CoreError::NoQuestions`] when there is nothing to save. A
    /// validation failure is recorded as the session error without starting
    /// a save.
    pub fn begin_save(&mut self) -> Result<Vec<QuestionData>, CoreError> {
        if self.saving {
            return Err(CoreError::SaveInProgress);
        }

        match self.payload() {
            Ok(questions) => {
                self.saving = true;
                self.last_error = None;
                Ok(questions)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Ends the current save.
    ///
    /// Clears the save flag in every case and records the error message on
    /// failure. There is no retry.
    pub fn finish_save<T, E: Display>(&mut self, result: Result<T, E>) -> Option<T> {
        self.saving = false;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let message = e.to_string();
                warn!("Save failed: {}", message);
                self.last_error = Some(message);
                None
            }
        }
    }
}

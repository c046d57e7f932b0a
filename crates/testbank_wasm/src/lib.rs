//! Browser bindings for the Test Bank editor.
//!
//! A [`TestEditor`] owns one document. The host editor forwards keystrokes
//! and preview clicks, then reads the text back.

use serde::Serialize;
use testbank_core::{
    EditorDocument, EditorSession, LineBreakAction, QuestionCard, TestBankConfig, TestRecord,
    TextDocument, ToggleOutcome, to_document,
};
use wasm_bindgen::prelude::*;

/// Converts any `Display`-implementing error into `JsError`.
///
/// `impl From<E> for JsError` is ruled out by the orphan rule.
fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen]
pub struct TestEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl TestEditor {
    /// Opens `text`. `config_json` is an optional `.testbank.json` body.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, config_json: Option<String>) -> Result<TestEditor, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => TestBankConfig::from_json(&json).map_err(to_js_error)?,
            None => TestBankConfig::default(),
        };
        let session = EditorSession::with_config(TextDocument::from_text(text), &config)
            .map_err(to_js_error)?;
        Ok(Self { session })
    }

    /// Opens a test fetched from the backend.
    #[wasm_bindgen(js_name = fromRecord)]
    pub fn from_record(record: JsValue) -> Result<TestEditor, JsError> {
        let record: TestRecord = serde_wasm_bindgen::from_value(record).map_err(to_js_error)?;
        Ok(Self::from_test_record(&record))
    }

    /// Returns the document text.
    pub fn text(&self) -> String {
        self.session.document().text()
    }

    /// Returns the paragraphs as an array of strings.
    pub fn lines(&self) -> js_sys::Array {
        self.session
            .document()
            .paragraphs()
            .iter()
            .map(|line| JsValue::from_str(line))
            .collect()
    }

    /// Returns the cursor offset.
    pub fn cursor(&self) -> usize {
        self.session.document().selection()
    }

    #[wasm_bindgen(js_name = setCursor)]
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), JsError> {
        self.session
            .document_mut()
            .set_selection(offset)
            .map_err(to_js_error)
    }

    /// Handles Enter at the cursor.
    ///
    /// Returns true when the keystroke was consumed; the host must then
    /// suppress its own line-break.
    #[wasm_bindgen(js_name = handleEnter)]
    pub fn handle_enter(&mut self) -> Result<bool, JsError> {
        self.enter().map(|action| action.is_some()).map_err(to_js_error)
    }

    /// Flips the correctness marker of a choice, as a preview click does.
    ///
    /// Returns true when the document changed.
    #[wasm_bindgen(js_name = toggleChoice)]
    pub fn toggle_choice(
        &mut self,
        question_index: usize,
        choice_index: usize,
    ) -> Result<bool, JsError> {
        let outcome = self
            .session
            .toggle_choice_flip(question_index, choice_index)
            .map_err(to_js_error)?;
        Ok(outcome == ToggleOutcome::Changed)
    }

    /// Adds or removes the correctness marker of a choice.
    ///
    /// Returns true when the document changed.
    #[wasm_bindgen(js_name = setChoiceMarker)]
    pub fn set_choice_marker(
        &mut self,
        question_index: usize,
        choice_index: usize,
        starred: bool,
    ) -> Result<bool, JsError> {
        let outcome = self
            .session
            .toggle_choice(question_index, choice_index, starred)
            .map_err(to_js_error)?;
        Ok(outcome == ToggleOutcome::Changed)
    }

    /// Returns the question cards.
    pub fn preview(&self) -> Result<JsValue, JsError> {
        let cards = self.cards()?;
        serde_wasm_bindgen::to_value(&cards).map_err(to_js_error)
    }

    /// Returns the save payload. Fails when there are no questions.
    pub fn payload(&self) -> Result<JsValue, JsError> {
        let questions = self.session.payload().map_err(to_js_error)?;
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        questions.serialize(&serializer).map_err(to_js_error)
    }

    /// Returns the save payload as a JSON string.
    #[wasm_bindgen(js_name = payloadJson)]
    pub fn payload_json(&self) -> Result<String, JsError> {
        let questions = self.session.payload().map_err(to_js_error)?;
        serde_json::to_string(&questions).map_err(to_js_error)
    }
}

impl TestEditor {
    fn from_test_record(record: &TestRecord) -> Self {
        Self {
            session: EditorSession::new(to_document(&record.question_data())),
        }
    }

    fn enter(&mut self) -> Result<Option<LineBreakAction>, testbank_core::CoreError> {
        self.session.handle_line_break()
    }

    fn cards(&self) -> Result<Vec<QuestionCard>, JsError> {
        self.session.preview().map_err(to_js_error)
    }
}

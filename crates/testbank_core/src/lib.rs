//! # testbank_core
//!
//! The editing model of Test Bank.
//!
//! This crate provides:
//! - [`EditorDocument`] and [`TextDocument`]: the document every edit goes
//!   through
//! - [`toggle_choice`]: the correctness marker toggle
//! - [`handle_line_break`]: auto-continuation of headings and choices
//! - [`to_questions`] and [`to_lines`]: conversion to and from the backend
//!   payload
//! - [`EditorSession`]: a document with preview, toggling and the save guard
//! - [`TestBankConfig`] and [`PublishConfig`]: tool and publish settings
//!
//! ## Example
//!
//! ```rust
//! use testbank_core::{EditorDocument, EditorSession, TextDocument};
//!
//! let mut doc = TextDocument::from_text("Question 1: What is 2+2?");
//! doc.move_to_end();
//!
//! let mut session = EditorSession::new(doc);
//! session.handle_line_break().unwrap();
//! assert_eq!(session.document().text_before_cursor(), "A. ");
//! ```

pub mod config;
pub mod continuation;
pub mod document;
mod error;
pub mod model;
pub mod payload;
pub mod preview;
pub mod publish;
pub mod session;
pub mod toggle;

pub use config::TestBankConfig;
pub use continuation::{
    Continuation, DEFAULT_CHOICES_PER_QUESTION, LineBreakAction, handle_line_break,
    max_heading_number,
};
pub use document::{EditorDocument, TextDocument};
pub use error::{CoreError, DocumentError};
pub use model::{
    Answer, ChoiceData, DetailedAnswer, QuestionCount, QuestionData, RecordChoice,
    RecordQuestion, Submission, SubmissionRecord, SubmissionResult, TestRecord, TestStatistics,
    TestStatus, TestSummary,
};
pub use payload::{choice_label, to_document, to_lines, to_payload, to_questions};
pub use preview::{PreviewChoice, QuestionCard, build_preview};
pub use publish::{AllowedTakers, ConfigIssue, ConfigType, PublishConfig, ShowCorrectAnswer};
pub use session::EditorSession;
pub use toggle::{ToggleOutcome, set_marker, toggle_choice};

//! Request bodies.

use serde::Serialize;
use testbank_core::{QuestionData, TestStatus};

/// Body of `POST /api/tests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTest {
    pub title: String,
    pub status: TestStatus,
    pub questions: Vec<QuestionData>,
    pub user_id: String,
}

impl CreateTest {
    /// Creates a draft owned by `user_id`.
    pub fn draft(
        title: impl Into<String>,
        user_id: impl Into<String>,
        questions: Vec<QuestionData>,
    ) -> Self {
        Self {
            title: title.into(),
            status: TestStatus::Draft,
            questions,
            user_id: user_id.into(),
        }
    }
}

/// Body of `PUT /api/tests/:id`. The backend replaces all questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestStatus>,
    pub questions: Vec<QuestionData>,
}

impl UpdateTest {
    /// Replaces the questions and leaves title and status alone.
    pub fn questions(questions: Vec<QuestionData>) -> Self {
        Self {
            title: None,
            status: None,
            questions,
        }
    }

    /// Also sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BulkDelete<'a> {
    pub test_ids: &'a [String],
}

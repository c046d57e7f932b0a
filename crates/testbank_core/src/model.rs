//! Backend data model.
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

/// A question as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    pub text: String,
    pub choices: Vec<ChoiceData>,
}

/// A choice as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceData {
    pub text: String,
    pub is_correct: bool,
}

/// Publication state of a test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Draft,
    Published,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A persisted test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TestStatus,
    #[serde(default)]
    pub user_id: String,
    /// Absent from publish responses.
    #[serde(default)]
    pub questions: Vec<RecordQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A persisted question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<RecordChoice>,
}

/// A persisted choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordChoice {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl From<&RecordChoice> for ChoiceData {
    fn from(choice: &RecordChoice) -> Self {
        Self {
            text: choice.text.clone(),
            is_correct: choice.is_correct,
        }
    }
}

impl From<&RecordQuestion> for QuestionData {
    fn from(question: &RecordQuestion) -> Self {
        Self {
            text: question.text.clone(),
            choices: question.choices.iter().map(ChoiceData::from).collect(),
        }
    }
}

impl TestRecord {
    /// Returns the questions without their ids.
    pub fn question_data(&self) -> Vec<QuestionData> {
        self.questions.iter().map(QuestionData::from).collect()
    }
}

/// A list entry from `GET /api/tests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TestStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(rename = "_count", default)]
    pub count: QuestionCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCount {
    pub questions: u32,
}

/// One answer in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub chosen_choice_id: Option<String>,
}

/// Body of `POST /api/tests/:id/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub user_id: String,
    pub answers: Vec<Answer>,
}

/// Per-question grading detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnswer {
    pub question_id: String,
    pub chosen_choice_id: Option<String>,
    pub is_correct: bool,
    pub correct_choice_id: Option<String>,
}

/// Grading result of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub submission_id: String,
    pub correct_count: u32,
    pub total_questions: u32,
    /// Percentage, rounded.
    pub score: u32,
    #[serde(default)]
    pub detailed_answers: Vec<DetailedAnswer>,
}

/// A stored submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: String,
    pub user_id: String,
    pub score: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub answers: serde_json::Value,
}

/// Aggregate results for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStatistics {
    pub submission_count: u32,
    /// Mean score, rounded.
    pub average_score: u32,
    #[serde(default)]
    pub submissions: Vec<SubmissionRecord>,
}

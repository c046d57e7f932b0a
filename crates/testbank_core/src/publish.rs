//! Publish-time test configuration.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the test is graded or for practice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    #[default]
    Test,
    Practice,
}

/// Who may take the test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllowedTakers {
    #[default]
    Everyone,
    ByClass,
    ByStudent,
}

/// When takers see the correct answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowCorrectAnswer {
    #[default]
    Off,
    On,
    /// Once the taker reaches [`PublishConfig::point_to_show_answer`].
    Reach,
}

/// Configuration sent to `PUT /api/tests/:id/publish`.
///
/// Optional groups are guarded by their `use_*` flag; a group's value is
/// only required while its flag is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublishConfig {
    pub title: String,

    pub use_grade: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub use_subject: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub use_purpose: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub use_description: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub config_type: ConfigType,
    pub use_duration: bool,
    /// Minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_duration: Option<i64>,

    pub use_access_time: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_time_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_time_to: Option<String>,
    pub use_allowed_takers: bool,
    pub allowed_takers: AllowedTakers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_students: Option<String>,
    pub use_attempts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_times: Option<i64>,

    pub use_password: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_password: Option<String>,
    pub question_answer_mixed: bool,
    pub shuffle_question_answers: bool,

    pub show_point: bool,
    pub show_correct_answer_option: ShowCorrectAnswer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_to_show_answer: Option<i64>,
    pub add_header_info: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_info: Option<String>,
}

/// A violated configuration rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    /// camelCase name of the offending field.
    pub field: &'static str,
    pub message: &'static str,
}

impl ConfigIssue {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn is_missing(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

impl PublishConfig {
    /// Creates a configuration with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns every violated rule, in field order.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.title.is_empty() {
            issues.push(ConfigIssue::new("title", "Test name is required."));
        }

        let toggled = [
            (self.use_grade, &self.grade, "grade", "Grade level is required when enabled."),
            (self.use_subject, &self.subject, "subject", "Subject is required when enabled."),
            (self.use_purpose, &self.purpose, "purpose", "Purpose is required when enabled."),
            (
                self.use_description,
                &self.description,
                "description",
                "Description is required when enabled.",
            ),
        ];
        for (enabled, value, field, message) in toggled {
            if enabled && is_missing(value) {
                issues.push(ConfigIssue::new(field, message));
            }
        }

        match self.test_duration {
            Some(minutes) if minutes < 1 => issues.push(ConfigIssue::new(
                "testDuration",
                "Duration must be at least 1 minute.",
            )),
            Some(minutes) if minutes > 1440 => issues.push(ConfigIssue::new(
                "testDuration",
                "Duration cannot exceed 1440 minutes (24 hours).",
            )),
            None if self.use_duration => issues.push(ConfigIssue::new(
                "testDuration",
                "Test duration is required when enabled.",
            )),
            _ => {}
        }

        if self.use_access_time {
            if is_missing(&self.access_time_from) || is_missing(&self.access_time_to) {
                issues.push(ConfigIssue::new(
                    "accessTimeFrom",
                    "Both start and end times are required when enabled.",
                ));
            } else if !self.access_window_is_ordered() {
                issues.push(ConfigIssue::new(
                    "accessTimeTo",
                    "Start time must be before end time.",
                ));
            }
        }

        if self.use_allowed_takers
            && self.allowed_takers == AllowedTakers::ByStudent
            && is_missing(&self.allowed_students)
        {
            issues.push(ConfigIssue::new(
                "allowedStudents",
                "Student emails are required when 'By Student' is selected.",
            ));
        }

        match self.submitted_times {
            Some(times) if times < 1 => {
                issues.push(ConfigIssue::new("submittedTimes", "Minimum 1 attempt."))
            }
            None if self.use_attempts => issues.push(ConfigIssue::new(
                "submittedTimes",
                "Max attempts is required when enabled.",
            )),
            _ => {}
        }

        if self.use_password && is_missing(&self.exam_password) {
            issues.push(ConfigIssue::new(
                "examPassword",
                "Exam password is required when enabled.",
            ));
        }

        match self.point_to_show_answer {
            Some(points) if !(0..=100).contains(&points) => issues.push(ConfigIssue::new(
                "pointToShowAnswer",
                "Score threshold must be between 0 and 100.",
            )),
            None if self.show_correct_answer_option == ShowCorrectAnswer::Reach => {
                issues.push(ConfigIssue::new(
                    "pointToShowAnswer",
                    "Score threshold is required when 'reach' is selected.",
                ))
            }
            _ => {}
        }

        if self.add_header_info && is_missing(&self.header_info) {
            issues.push(ConfigIssue::new(
                "headerInfo",
                "Header content is required when enabled.",
            ));
        }

        issues
    }

    /// Returns true if the configuration has no issues.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    fn access_window_is_ordered(&self) -> bool {
        let from = self.access_time_from.as_deref().and_then(parse_timestamp);
        let to = self.access_time_to.as_deref().and_then(parse_timestamp);
        matches!((from, to), (Some(from), Some(to)) if from < to)
    }
}

/// Formats accepted for times without an offset.
const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DDTHH:MM[:SS]` local time.
/// Local times are read as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|local| local.and_utc())
}

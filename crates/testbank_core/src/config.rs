//! Tool configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use testbank_parser::{BlockParser, PreamblePolicy};

use crate::{Continuation, CoreError};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for the editor core and the command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestBankConfig {
    /// Base URL of the backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Owner id for created and listed tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Choices per question for auto-continuation.
    #[serde(default = "default_choices_per_question")]
    pub choices_per_question: u8,

    /// Handling of lines before the first heading.
    #[serde(default)]
    pub preamble: PreamblePolicy,

    /// HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_choices_per_question() -> u8 {
    crate::DEFAULT_CHOICES_PER_QUESTION
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for TestBankConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBankConfig {
    /// File names looked up by [`TestBankConfig::discover`], in order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".testbank.jsonc", ".testbank.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            api_url: default_api_url(),
            user_id: None,
            choices_per_question: default_choices_per_question(),
            preamble: PreamblePolicy::default(),
            timeout_secs: default_timeout_secs(),
            base_dir: None,
        }
    }

    /// Finds a configuration file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.testbank.jsonc` and `.testbank.json`; comments and
    /// trailing commas are accepted in both.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CoreError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON (or JSONC) string with schema
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| CoreError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(CoreError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| CoreError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the block parser for the configured preamble policy.
    pub fn parser(&self) -> BlockParser {
        BlockParser::with_policy(self.preamble)
    }

    /// Returns the continuation rules.
    pub fn continuation(&self) -> Result<Continuation, CoreError> {
        Continuation::new(self.choices_per_question)
    }
}

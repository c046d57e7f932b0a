//! Question block segmentation.

use serde::{Deserialize, Serialize};
use testbank_ast::{Line, QuestionBlock};

use crate::classify::is_heading;
use crate::{LineSource, ParseError, extract_lines};

/// What to do with lines that appear before the first heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreamblePolicy {
    /// Group them into a leading block without a proper heading.
    #[default]
    Implicit,
    /// Drop them.
    Discard,
    /// Fail on the first non-blank one. Blank lines are dropped.
    Reject,
}

/// Splits lines into question blocks.
///
/// A line matching `Question <N>:` (case-insensitive, surrounding whitespace
/// ignored) starts a new block. Every other line joins the current block,
/// including whitespace-only lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockParser {
    policy: PreamblePolicy,
}

impl BlockParser {
    /// Creates a parser with the default [`PreamblePolicy::Implicit`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given preamble policy.
    pub fn with_policy(policy: PreamblePolicy) -> Self {
        Self { policy }
    }

    /// Returns the preamble policy.
    pub fn policy(&self) -> PreamblePolicy {
        self.policy
    }

    /// Extracts lines from `source` and segments them.
    pub fn parse<S>(&self, source: &S) -> Result<Vec<QuestionBlock>, ParseError>
    where
        S: LineSource + ?Sized,
    {
        self.segment(&extract_lines(source))
    }

    /// Segments already extracted lines.
    pub fn segment(&self, lines: &[Line]) -> Result<Vec<QuestionBlock>, ParseError> {
        let mut blocks = Vec::new();
        let mut current: Option<QuestionBlock> = None;

        for line in lines {
            if is_heading(&line.text) {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                current = Some(QuestionBlock::with_heading(line.clone()));
                continue;
            }

            match current.as_mut() {
                Some(block) => block.push(line.clone()),
                None => match self.policy {
                    PreamblePolicy::Implicit => {
                        current = Some(QuestionBlock::implicit(line.clone()));
                    }
                    PreamblePolicy::Discard => {}
                    PreamblePolicy::Reject => {
                        if !line.is_blank() {
                            return Err(ParseError::orphan_line(line.index, &line.text));
                        }
                    }
                },
            }
        }

        if let Some(block) = current {
            blocks.push(block);
        }

        Ok(blocks)
    }
}

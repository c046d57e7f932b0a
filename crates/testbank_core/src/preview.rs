//! Preview cards derived from question blocks.

use serde::Serialize;
use testbank_ast::{ParsedChoice, QuestionBlock};
use testbank_parser::{classify, heading_text, parse_choice};

/// Display data for one question block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCard {
    /// Position of the block in the document.
    pub index: usize,
    /// Number from the heading, or `index + 1` without one.
    pub number: u32,
    pub text: String,
    pub choices: Vec<PreviewChoice>,
}

/// One choice row of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewChoice {
    /// Index to pass to the toggle engine for this row.
    pub choice_index: usize,
    #[serde(flatten)]
    pub parsed: ParsedChoice,
}

impl QuestionCard {
    /// Builds the card for block `index`.
    pub fn from_block(index: usize, block: &QuestionBlock) -> Self {
        let number = block
            .heading()
            .and_then(|line| classify(&line.text).heading_number())
            .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX));

        // Blank rows are hidden but still count toward paragraph positions.
        let choices = block
            .lines
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, line)| !line.is_blank())
            .map(|(position, line)| PreviewChoice {
                choice_index: position - 1,
                parsed: parse_choice(&line.text),
            })
            .collect();

        Self {
            index,
            number,
            text: heading_text(&block.first().text),
            choices,
        }
    }

    /// Returns the label of the first starred choice.
    pub fn correct_label(&self) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.parsed.starred)
            .map(|choice| choice.parsed.label.as_str())
    }
}

/// Builds one card per block.
pub fn build_preview(blocks: &[QuestionBlock]) -> Vec<QuestionCard> {
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| QuestionCard::from_block(index, block))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testbank_parser::BlockParser;

    fn cards(source: &str) -> Vec<QuestionCard> {
        build_preview(&BlockParser::new().parse(source).unwrap())
    }

    #[test]
    fn test_card_from_heading_block() {
        let cards = cards("Question 3: What is 2+2?\nA. Three\n*B. Four");

        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.number, 3);
        assert_eq!(card.text, "What is 2+2?");
        assert_eq!(card.choices.len(), 2);
        assert_eq!(card.choices[1].choice_index, 1);
        assert_eq!(card.choices[1].parsed.label, "B");
        assert_eq!(card.correct_label(), Some("B"));
    }

    #[test]
    fn test_blank_lines_hidden_but_indices_kept() {
        let cards = cards("Question 1: Q\nA. a\n\nB. b");
        let indices: Vec<usize> = cards[0].choices.iter().map(|c| c.choice_index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_implicit_block_card() {
        let cards = cards("Intro\nA. x\nQuestion 5: Q");

        assert_eq!(cards[0].number, 1);
        assert_eq!(cards[0].text, "Intro");
        assert_eq!(cards[0].choices[0].parsed.text, "x");
        assert_eq!(cards[1].number, 5);
        assert!(cards[1].choices.is_empty());
    }

    #[test]
    fn test_unlabeled_row() {
        let cards = cards("Question 1: Q\nZ");
        assert!(cards[0].choices[0].parsed.is_unlabeled());
        assert_eq!(cards[0].correct_label(), None);
    }

    #[test]
    fn test_card_serializes_flat_choice() {
        let cards = cards("Question 1: Q\n*A. a");
        let json = serde_json::to_value(&cards[0]).unwrap();
        assert_eq!(json["choices"][0]["choiceIndex"], 0);
        assert_eq!(json["choices"][0]["label"], "A");
        assert_eq!(json["choices"][0]["starred"], true);
    }
}

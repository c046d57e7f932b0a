//! Text output formatter

use std::fmt::Write;

use testbank_core::{QuestionCard, QuestionData, TestStatistics, TestSummary, choice_label};

pub fn format_questions(questions: &[QuestionData]) -> String {
    let mut out = String::new();
    for (i, question) in questions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, question.text);
        for (j, choice) in question.choices.iter().enumerate() {
            let mark = if choice.is_correct { "(correct)" } else { "" };
            let _ = writeln!(out, "   {}) {} {}", choice_label(j), choice.text, mark);
        }
    }

    let total: usize = questions.iter().map(|q| q.choices.len()).sum();
    let _ = write!(
        out,
        "\n{} questions, {} choices",
        questions.len(),
        total
    );
    trim_line_ends(out)
}

pub fn format_preview(cards: &[QuestionCard]) -> String {
    let mut out = String::new();
    for card in cards {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}] {}", card.number, card.text);
        for choice in &card.choices {
            let marker = if choice.parsed.starred { '*' } else { ' ' };
            if choice.parsed.is_unlabeled() {
                let _ = writeln!(out, "  {} ?  {}", marker, choice.parsed.raw.trim());
            } else {
                let _ = writeln!(
                    out,
                    "  {} {}. {}",
                    marker, choice.parsed.label, choice.parsed.text
                );
            }
        }
        if card.correct_label().is_none() && !card.choices.is_empty() {
            let _ = writeln!(out, "  (no correct answer marked)");
        }
    }
    trim_line_ends(out)
}

pub fn format_tests(tests: &[TestSummary]) -> String {
    if tests.is_empty() {
        return "No tests found".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<24} | {:<10} | {:>9} | Title", "Id", "Status", "Questions");
    let _ = writeln!(out, "{:-<24}-+-{:-<10}-+-{:->9}-+-{:-<5}", "", "", "", "");
    for test in tests {
        let _ = writeln!(
            out,
            "{:<24} | {:<10} | {:>9} | {}",
            test.id,
            test.status.to_string(),
            test.count.questions,
            test.title
        );
    }
    trim_line_ends(out)
}

pub fn format_statistics(stats: &TestStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Submissions:   {}", stats.submission_count);
    let _ = write!(out, "Average score: {}", stats.average_score);
    for submission in &stats.submissions {
        let _ = write!(
            out,
            "\n  {} {:>3}  {}",
            submission.user_id,
            submission.score,
            submission.created_at.as_deref().unwrap_or("-")
        );
    }
    out
}

fn trim_line_ends(out: String) -> String {
    out.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

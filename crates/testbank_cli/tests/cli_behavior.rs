//! Integration tests for the local document commands
//!
//! These tests run the `tbank` binary against files on disk and check what
//! a user sees: stdout, stderr, exit codes and rewritten files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a command for the tbank CLI
fn tbank_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tbank"))
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copies a fixture into a fresh directory so it can be edited.
fn editable_copy(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &path).unwrap();
    (dir, path)
}

fn write_doc(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("test.txt");
    fs::write(&path, content).unwrap();
    path
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        tbank_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        tbank_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod parse_command {
    use super::*;

    #[test]
    fn prints_questions_as_text() {
        tbank_cmd()
            .arg("parse")
            .arg(fixtures_dir().join("sample.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("1. What is 2+2?"))
            .stdout(predicate::str::contains("B) Four (correct)"))
            .stdout(predicate::str::contains("2 questions, 8 choices"));
    }

    #[test]
    fn prints_payload_as_json() {
        let output = tbank_cmd()
            .arg("parse")
            .arg(fixtures_dir().join("sample.txt"))
            .arg("--format")
            .arg("json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(payload.as_array().unwrap().len(), 2);
        assert_eq!(payload[1]["text"], "Capital of France?");
        assert_eq!(payload[1]["choices"][2]["text"], "Paris");
        assert_eq!(payload[1]["choices"][2]["isCorrect"], true);
        assert_eq!(payload[0]["choices"][0]["isCorrect"], false);
    }

    #[test]
    fn fails_when_document_has_no_questions() {
        tbank_cmd()
            .arg("parse")
            .arg(fixtures_dir().join("notes.txt"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("no questions found"));
    }

    #[test]
    fn normalizes_crlf_line_endings() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(dir.path(), "Question 1: Q\r\n*A. Yes\r\nB. No\r\n");

        let output = tbank_cmd()
            .arg("parse")
            .arg(&path)
            .arg("--format")
            .arg("json")
            .output()
            .unwrap();

        let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(payload[0]["choices"][0]["text"], "Yes");
        assert_eq!(payload[0]["choices"][1]["text"], "No");
    }

    #[test]
    fn reports_missing_file() {
        tbank_cmd()
            .arg("parse")
            .arg("does-not-exist.txt")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Failed to read"));
    }
}

mod preview_command {
    use super::*;

    #[test]
    fn renders_cards() {
        let dir = TempDir::new().unwrap();

        tbank_cmd()
            .current_dir(dir.path())
            .arg("preview")
            .arg(fixtures_dir().join("sample.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("[1] What is 2+2?"))
            .stdout(predicate::str::contains("* B. Four"))
            .stdout(predicate::str::contains("[2] Capital of France?"))
            .stdout(predicate::str::contains("* C. Paris"));
    }

    #[test]
    fn rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".testbank.json"),
            r#"{ "choicesPerQuestion": 0 }"#,
        )
        .unwrap();

        tbank_cmd()
            .current_dir(dir.path())
            .arg("preview")
            .arg(fixtures_dir().join("sample.txt"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }

    #[test]
    fn reject_policy_reports_preamble() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".testbank.jsonc"),
            r#"{ "preamble": "reject" }"#,
        )
        .unwrap();
        let path = write_doc(dir.path(), "Intro text\nQuestion 1: Q\nA. a\n");

        tbank_cmd()
            .current_dir(dir.path())
            .arg("preview")
            .arg(&path)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Intro text"));
    }
}

mod toggle_command {
    use super::*;

    #[test]
    fn marks_choice_as_correct() {
        let (dir, path) = editable_copy("sample.txt");

        tbank_cmd()
            .current_dir(dir.path())
            .args(["toggle", "sample.txt", "--question", "1", "--choice", "1"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Marked question 1 choice 1"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Question 1: What is 2+2?\n*A. Three\n*B. Four\n"));
    }

    #[test]
    fn unset_removes_marker() {
        let (dir, path) = editable_copy("sample.txt");

        tbank_cmd()
            .current_dir(dir.path())
            .args(["toggle", "sample.txt", "--question", "2", "--choice", "3", "--unset"])
            .assert()
            .success();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\nC) Paris\n"));
        assert!(!content.contains("*C) Paris"));
    }

    #[test]
    fn leaves_file_alone_when_already_set() {
        let (dir, path) = editable_copy("sample.txt");
        let before = fs::read_to_string(&path).unwrap();

        tbank_cmd()
            .current_dir(dir.path())
            .args(["toggle", "sample.txt", "--question", "1", "--choice", "2"])
            .assert()
            .success()
            .stderr(predicate::str::contains("already set"));

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn fails_for_missing_choice() {
        let (dir, path) = editable_copy("sample.txt");
        let before = fs::read_to_string(&path).unwrap();

        tbank_cmd()
            .current_dir(dir.path())
            .args(["toggle", "sample.txt", "--question", "3", "--choice", "1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Question 3 has no choice 1"));

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn rejects_zero_index() {
        tbank_cmd()
            .args(["toggle", "sample.txt", "--question", "0", "--choice", "1"])
            .assert()
            .failure();
    }
}

mod continue_command {
    use super::*;
    use assert_fs::prelude::*;

    fn doc(content: &str) -> (assert_fs::TempDir, assert_fs::fixture::ChildPath) {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("test.txt");
        file.write_str(content).unwrap();
        (dir, file)
    }

    #[test]
    fn adds_next_choice() {
        let (dir, file) = doc("Question 1: Q\nA. a\n");

        tbank_cmd()
            .current_dir(dir.path())
            .arg("continue")
            .arg(file.path())
            .assert()
            .success()
            .stderr(predicate::str::contains("Added choice B"));

        file.assert("Question 1: Q\nA. a\nB. \n");
    }

    #[test]
    fn starts_next_question_after_last_choice() {
        let (dir, file) = doc("Question 1: Q\nA. a\nB. b\nC. c\nD. d\n");

        tbank_cmd()
            .current_dir(dir.path())
            .arg("continue")
            .arg(file.path())
            .assert()
            .success()
            .stderr(predicate::str::contains("Started question 2"));

        file.assert("Question 1: Q\nA. a\nB. b\nC. c\nD. d\n\nQuestion 2: \n");
    }

    #[test]
    fn honors_configured_choice_count() {
        let (dir, file) = doc("Question 4: Q\nA. yes\nB. no\n");
        dir.child(".testbank.json")
            .write_str(r#"{ "choicesPerQuestion": 2 }"#)
            .unwrap();

        tbank_cmd()
            .current_dir(dir.path())
            .arg("continue")
            .arg(file.path())
            .assert()
            .success();

        file.assert(predicate::str::ends_with("B. no\n\nQuestion 5: \n"));
    }

    #[test]
    fn reports_when_nothing_applies() {
        let (dir, file) = doc("just a note\n");

        tbank_cmd()
            .current_dir(dir.path())
            .arg("continue")
            .arg(file.path())
            .assert()
            .success()
            .stderr(predicate::str::contains("Nothing to continue"));

        file.assert("just a note\n");
    }
}

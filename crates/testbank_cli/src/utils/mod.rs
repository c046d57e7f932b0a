//! CLI utility functions

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use miette::{IntoDiagnostic, Result, WrapErr};
use testbank_client::TestBankClient;
use testbank_core::{TestBankConfig, TextDocument};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::cli::Cli;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads `--config`, or the configuration found in the working directory,
/// or the defaults. `--api-url` wins over the file.
pub fn load_config(cli: &Cli) -> Result<TestBankConfig> {
    let mut config = if let Some(ref path) = cli.config {
        TestBankConfig::from_file(path).into_diagnostic()?
    } else {
        let cwd = std::env::current_dir().into_diagnostic()?;
        match TestBankConfig::discover(&cwd) {
            Some(path) => {
                debug!("Using config {}", path.display());
                TestBankConfig::from_file(&path).into_diagnostic()?
            }
            None => TestBankConfig::default(),
        }
    };

    if let Some(ref url) = cli.api_url {
        config.api_url = url.clone();
    }
    Ok(config)
}

pub fn create_client(config: &TestBankConfig) -> Result<TestBankClient> {
    TestBankClient::builder()
        .base_url(config.api_url.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .into_diagnostic()
}

pub fn require_user_id(config: &TestBankConfig) -> Result<&str> {
    config
        .user_id
        .as_deref()
        .ok_or_else(|| miette::miette!("userId is not set. Add it to the config file."))
}

/// Reads a document file. CRLF line endings are normalized and one
/// trailing newline is dropped.
pub fn read_document(path: &Path) -> Result<TextDocument> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let content = content.replace("\r\n", "\n");
    let content = content.strip_suffix('\n').unwrap_or(&content);
    Ok(TextDocument::from_text(content))
}

/// Writes a document file with a trailing newline.
pub fn write_document(path: &Path, doc: &TextDocument) -> Result<()> {
    let mut text = doc.text();
    text.push('\n');
    fs::write(path, text)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write {}", path.display()))
}

/// Creates `path` for writing, failing if anything exists there. On unix a
/// symlink at `path` is not followed.
fn create_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}

/// Writes `contents` to a freshly created file at `path`.
///
/// Whatever already sits at `path` is removed first when `overwrite` is
/// set, and left alone otherwise. Returns false when it was left alone.
pub fn write_new_file(path: &Path, contents: &str, overwrite: bool) -> Result<bool> {
    loop {
        match create_exclusive(path) {
            Ok(mut file) => {
                file.write_all(contents.as_bytes())
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                return Ok(true);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !overwrite {
                    return Ok(false);
                }
                // Another process may remove it first; the next create decides.
                match fs::remove_file(path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => {
                return Err(e)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to create {}", path.display()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_read_document_normalizes_line_endings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        fs::write(&path, "Question 1: Q\r\nA. a\r\n").unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.paragraphs(), ["Question 1: Q", "A. a"]);
    }

    #[test]
    fn test_write_document_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let doc = TextDocument::from_text("Question 1: Q\n*A. a");

        write_document(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Question 1: Q\n*A. a\n");
        assert_eq!(read_document(&path).unwrap(), doc);
    }

    #[test]
    fn test_write_new_file_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new.jsonc");

        assert!(write_new_file(&path, "{}", false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_new_file_keeps_existing_without_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("existing.jsonc");
        fs::write(&path, "old").unwrap();

        assert!(!write_new_file(&path, "new", false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_write_new_file_replaces_existing_with_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("existing.jsonc");
        fs::write(&path, "old").unwrap();

        assert!(write_new_file(&path, "new", true).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_new_file_replaces_symlink_not_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target.txt");
        let link = dir.path().join("link.jsonc");
        fs::write(&target, "target").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(!write_new_file(&link, "new", false).unwrap());
        assert!(write_new_file(&link, "new", true).unwrap());

        assert_eq!(fs::read_to_string(&target).unwrap(), "target");
        assert!(!fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&link).unwrap(), "new");
    }
}

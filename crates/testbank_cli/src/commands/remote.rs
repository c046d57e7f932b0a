//! Backend commands

use std::fs;
use std::path::Path;

use jsonc_parser::ParseOptions;
use miette::{IntoDiagnostic, Result, WrapErr};
use testbank_client::{CreateTest, UpdateTest};
use testbank_core::{CoreError, EditorSession, PublishConfig, TestBankConfig, to_document};
use tracing::{error, info};

use crate::cli::OutputFormat;
use crate::output::{format_statistics, format_tests, output_json};
use crate::utils::{
    create_client, create_tokio_runtime, read_document, require_user_id, write_document,
};

/// Creates a test from `path`, or replaces the questions of test `id`.
pub fn run_push(
    config: &TestBankConfig,
    path: &Path,
    id: Option<&str>,
    title: Option<&str>,
) -> Result<bool> {
    let user_id = match id {
        Some(_) => None,
        None => Some(require_user_id(config)?),
    };
    let mut session =
        EditorSession::with_config(read_document(path)?, config).into_diagnostic()?;

    let questions = match session.begin_save() {
        Ok(questions) => questions,
        Err(e @ CoreError::NoQuestions) => {
            error!("{}: {}", path.display(), e);
            return Ok(true);
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    let client = create_client(config)?;
    let runtime = create_tokio_runtime()?;

    let result = match (id, user_id) {
        (Some(id), _) => {
            let mut body = UpdateTest::questions(questions);
            if let Some(title) = title {
                body = body.with_title(title);
            }
            runtime.block_on(client.update_test(id, &body))
        }
        (None, user_id) => {
            let user_id = user_id.unwrap_or_default();
            let title = match title {
                Some(title) => title.to_string(),
                None => default_title(path),
            };
            let body = CreateTest::draft(title, user_id, questions);
            runtime.block_on(client.create_test(&body))
        }
    };

    match session.finish_save(result) {
        Some(record) => {
            let verb = if id.is_some() { "Updated" } else { "Created" };
            info!("{} test {} ({})", verb, record.id, record.title);
            println!("{}", record.id);
            Ok(false)
        }
        None => Err(miette::miette!(
            "Save failed: {}",
            session.last_error().unwrap_or("unknown error")
        )),
    }
}

fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Downloads test `id` as an editable document.
pub fn run_pull(config: &TestBankConfig, id: &str, output: Option<&Path>) -> Result<bool> {
    let client = create_client(config)?;
    let runtime = create_tokio_runtime()?;
    let record = runtime.block_on(client.get_test(id)).into_diagnostic()?;

    let doc = to_document(&record.question_data());
    match output {
        Some(path) => {
            write_document(path, &doc)?;
            info!("Wrote {} to {}", record.title, path.display());
        }
        None => println!("{}", doc.text()),
    }
    Ok(false)
}

/// Validates and publishes a configuration. Returns true when it is
/// invalid.
pub fn run_publish(config: &TestBankConfig, id: &str, config_file: &Path) -> Result<bool> {
    let publish = read_publish_config(config_file)?;

    let issues = publish.validate();
    if !issues.is_empty() {
        for issue in &issues {
            error!("{}", issue);
        }
        return Ok(true);
    }

    let client = create_client(config)?;
    let runtime = create_tokio_runtime()?;
    let record = runtime
        .block_on(client.publish_test(id, &publish))
        .into_diagnostic()?;

    info!("Published {} ({})", record.title, record.status);
    Ok(false)
}

fn read_publish_config(path: &Path) -> Result<PublishConfig> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| miette::miette!("Invalid JSON: {}", e))?
        .ok_or_else(|| miette::miette!("{} is empty", path.display()))?;
    serde_json::from_value(value)
        .into_diagnostic()
        .wrap_err("Invalid publish configuration")
}

pub fn run_list(config: &TestBankConfig, format: OutputFormat) -> Result<bool> {
    let user_id = require_user_id(config)?;
    let client = create_client(config)?;
    let runtime = create_tokio_runtime()?;
    let tests = runtime
        .block_on(client.list_tests(user_id))
        .into_diagnostic()?;

    match format {
        OutputFormat::Json => output_json(&tests)?,
        OutputFormat::Text => println!("{}", format_tests(&tests)),
    }
    Ok(false)
}

pub fn run_delete(config: &TestBankConfig, ids: &[String]) -> Result<bool> {
    let client = create_client(config)?;
    let runtime = create_tokio_runtime()?;

    if let [id] = ids {
        runtime.block_on(client.delete_test(id)).into_diagnostic()?;
        info!("Deleted test {}", id);
    } else {
        let count = runtime
            .block_on(client.bulk_delete(ids))
            .into_diagnostic()?;
        info!("Deleted {} tests", count);
    }
    Ok(false)
}

pub fn run_stats(config: &TestBankConfig, id: &str, format: OutputFormat) -> Result<bool> {
    let client = create_client(config)?;
    let runtime = create_tokio_runtime()?;
    let stats = runtime.block_on(client.statistics(id)).into_diagnostic()?;

    match format {
        OutputFormat::Json => output_json(&stats)?,
        OutputFormat::Text => println!("{}", format_statistics(&stats)),
    }
    Ok(false)
}

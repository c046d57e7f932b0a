//! Test Bank CLI
//!
//! Edit multiple-choice tests as plain text and sync them with the backend.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::document::{run_continue, run_parse, run_preview, run_toggle};
use crate::commands::init::run_init;
use crate::commands::remote::{
    run_delete, run_list, run_publish, run_pull, run_push, run_stats,
};
use crate::utils::load_config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(failed) => {
            if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs a command. `Ok(true)` means the input was rejected.
fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Parse { file, format } => run_parse(file, *format),
        Commands::Init { force } => run_init(*force).map(|_| false),
        Commands::Preview { file } => run_preview(&load_config(&cli)?, file),
        Commands::Toggle {
            file,
            question,
            choice,
            unset,
        } => run_toggle(&load_config(&cli)?, file, *question, *choice, !*unset),
        Commands::Continue { file } => run_continue(&load_config(&cli)?, file),
        Commands::Push { file, id, title } => run_push(
            &load_config(&cli)?,
            file,
            id.as_deref(),
            title.as_deref(),
        ),
        Commands::Pull { id, output } => run_pull(&load_config(&cli)?, id, output.as_deref()),
        Commands::Publish { id, config_file } => {
            run_publish(&load_config(&cli)?, id, config_file)
        }
        Commands::List { format } => run_list(&load_config(&cli)?, *format),
        Commands::Delete { ids } => run_delete(&load_config(&cli)?, ids),
        Commands::Stats { id, format } => run_stats(&load_config(&cli)?, id, *format),
    }
}

//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Test Bank - write multiple-choice tests as plain text
#[derive(Parser)]
#[command(name = "tbank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides the configuration)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the questions of a document
    Parse {
        /// Document to parse
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Render question cards
    Preview {
        /// Document to preview
        file: PathBuf,
    },

    /// Mark or unmark a choice as correct
    Toggle {
        /// Document to edit
        file: PathBuf,

        /// Question number, starting at 1
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        question: u32,

        /// Choice number within the question, starting at 1
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        choice: u32,

        /// Remove the marker instead of adding it
        #[arg(long)]
        unset: bool,
    },

    /// Continue the last line as if Enter was pressed at its end
    Continue {
        /// Document to edit
        file: PathBuf,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Save a document to the backend
    Push {
        /// Document to save
        file: PathBuf,

        /// Update this test instead of creating one
        #[arg(long)]
        id: Option<String>,

        /// Test title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
    },

    /// Download a test as an editable document
    Pull {
        /// Test id
        id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Publish a test
    Publish {
        /// Test id
        id: String,

        /// Publish configuration file (JSON)
        #[arg(long = "config-file", value_name = "FILE")]
        config_file: PathBuf,
    },

    /// List your tests
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete one or more tests
    Delete {
        /// Test ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show submission statistics
    Stats {
        /// Test id
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

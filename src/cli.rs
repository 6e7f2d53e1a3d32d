//! CLI interface for the resume portal

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-portal")]
#[command(about = "Submit and search resumes on a remote resume service")]
#[command(long_about = "Upload PDF resumes to a resume service and search the submitted resumes by free-text query, interactively or one command at a time")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Resume service base URL (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive shell on a screen
    Shell {
        /// Start path: /, /submit or /search
        #[arg(default_value = "/")]
        path: String,
    },

    /// Upload a PDF resume
    Submit {
        /// Path to the resume (PDF)
        file: PathBuf,
    },

    /// Search submitted resumes
    Search {
        /// Free-text query, e.g. "3 years experience in React"
        query: String,

        /// Output format: console, json, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Print the download link of a stored resume
    Link {
        /// Resume identifier returned by search
        pdf_file_id: String,
    },

    /// Open the download link of a stored resume in the browser
    Open {
        /// Resume identifier returned by search
        pdf_file_id: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "service.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

//! Command line argument parsing for the Lately CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Lately - search your recently used files
#[derive(Parser, Debug, Clone)]
#[command(name = "lately")]
#[command(about = "Search a recently used file history")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LatelyArgs {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Search configuration file (JSON)
    #[arg(short, long, env = "LATELY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LatelyArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }

    /// Default log filter for the verbosity level
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the history
    Search(SearchArgs),

    /// List the records of the history
    List(ListArgs),

    /// Open the best match
    Open(OpenArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// History file (JSON array or JSON Lines)
    #[arg(value_name = "RECORDS_FILE")]
    pub records_file: PathBuf,

    /// Search terms
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Narrow the results with a longer query, as typed (repeatable)
    #[arg(short, long, value_name = "QUERY")]
    pub refine: Vec<String>,

    /// Maximum number of results to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Keep local files that no longer exist
    #[arg(long)]
    pub include_missing: bool,
}

/// Arguments for listing records
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// History file (JSON array or JSON Lines)
    #[arg(value_name = "RECORDS_FILE")]
    pub records_file: PathBuf,
}

/// Arguments for opening the best match
#[derive(Parser, Debug, Clone)]
pub struct OpenArgs {
    /// History file (JSON array or JSON Lines)
    #[arg(value_name = "RECORDS_FILE")]
    pub records_file: PathBuf,

    /// Search terms
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Program used for records without a launch target
    #[arg(long, default_value = "xdg-open")]
    pub opener: String,

    /// Program used to start application ids
    #[arg(long, default_value = "gtk-launch")]
    pub app_launcher: String,

    /// Print the command line instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through a JSON array of records
#[derive(Parser, Debug)]
#[command(name = "client-paging")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Records file (JSON array)
    #[arg(short, long, global = true)]
    pub records: Option<PathBuf>,

    /// Paging options file (JSON or YAML)
    #[arg(short, long, global = true)]
    pub options: Option<PathBuf>,

    /// Starting page (overrides the options file)
    #[arg(short, long, global = true)]
    pub page: Option<usize>,

    /// Records per page (overrides the options file)
    #[arg(long, global = true)]
    pub per_page: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log level for diagnostics on stderr
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose output (same as `--log-level debug`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level requested on the command line
    pub fn effective_log_level(&self) -> LogLevel {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => LogLevel::Debug,
            (None, false) => LogLevel::default(),
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the starting page without navigating
    Info,

    /// Go to a page number or shortcut (first, last, next, previous)
    #[command(name = "go-to")]
    GoTo {
        /// Page number (fractions are rounded) or shortcut token
        #[arg(allow_hyphen_values = true)]
        target: String,
    },

    /// Go to the first page
    First,

    /// Go to the last page
    Last,

    /// Go to the next page
    Next,

    /// Go to the previous page
    Previous,

    /// Change the page size and re-resolve the current page
    #[command(name = "per-page")]
    PerPage {
        /// New page size, parsed as JSON (e.g. `5`; `3.5` or `"5"` are rejected)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Pretty-printed JSON
    Pretty,
}

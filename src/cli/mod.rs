//! CLI module
//!
//! Command-line interface for paging through a records file.
//!
//! # Commands
//!
//! - `info` - Show the starting page
//! - `go-to` - Navigate to a page number or shortcut token
//! - `first`, `last`, `next`, `previous` - Shortcut navigation
//! - `per-page` - Change the page size

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{load_records, EventRecord, Report, Runner};

//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::PagingOptions;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{PageInfo, Paginated, PerPage, Target};
use crate::types::{JsonValue, VisibleSlice};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One notification observed while running a command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Event name
    pub name: &'static str,
    /// New value of the changed field
    pub value: usize,
    /// Number of records in the delivered slice
    pub records: usize,
}

/// Result of a command run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Page summary after the command
    pub page: PageInfo,
    /// Visible slice after the command
    pub records: VisibleSlice,
    /// Notifications fired by the command, in order
    pub events: Vec<EventRecord>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print the report
    pub fn run(&self) -> Result<()> {
        let report = self.execute()?;
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(&report)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(&report)?,
        };
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return the report
    pub fn execute(&self) -> Result<Report> {
        let records = self.load_records()?;
        let options = self.options()?;
        let mut paged = Paginated::new(records, &options);

        let events: Arc<Mutex<Vec<EventRecord>>> = Arc::default();
        let sink = Arc::clone(&events);
        paged.subscribe(move |event| {
            if let Ok(mut log) = sink.lock() {
                log.push(EventRecord {
                    name: event.name(),
                    value: event.value(),
                    records: event.slice().len(),
                });
            }
        });

        let records = match &self.cli.command {
            Commands::Info => paged.visible(),
            Commands::GoTo { target } => paged.go_to(parse_target(target)),
            Commands::First => paged.first_page(),
            Commands::Last => paged.last_page(),
            Commands::Next => paged.next_page(),
            Commands::Previous => paged.previous_page(),
            Commands::PerPage { value } => {
                let value: JsonValue = serde_json::from_str(value).map_err(|_| {
                    Error::invalid_argument("per_page", format!("must be a number, got {value}"))
                })?;
                paged.set_page_size(&value)?
            }
        };

        let events = events
            .lock()
            .map(|log| log.clone())
            .map_err(|_| Error::Other("event log poisoned".into()))?;

        Ok(Report {
            page: paged.page_info(),
            records,
            events,
        })
    }

    /// Load the records file (a JSON array)
    fn load_records(&self) -> Result<Vec<JsonValue>> {
        let path = self
            .cli
            .records
            .as_ref()
            .ok_or_else(|| Error::config("Records file not specified (use -r flag)"))?;
        load_records(path)
    }

    /// Options file layered under the command-line overrides
    fn options(&self) -> Result<PagingOptions> {
        let base = match &self.cli.options {
            Some(path) => PagingOptions::from_file(path)?,
            None => PagingOptions::default(),
        };

        let mut overrides = PagingOptions::new();
        if let Some(page) = self.cli.page {
            overrides = overrides.with_current_page(page);
        }
        if let Some(per_page) = self.cli.per_page {
            overrides = overrides.with_per_page(PerPage::try_from(per_page)?);
        }
        Ok(base.merge(&overrides))
    }
}

/// Load a JSON array of records from `path`
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<JsonValue>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let value: JsonValue = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records file '{}'", path.display()))?;

    match value {
        JsonValue::Array(records) => Ok(records),
        other => Err(Error::config(format!(
            "Records file '{}' must contain a JSON array, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

/// Numbers go to a page (rounded); anything else is a shortcut token
fn parse_target(raw: &str) -> Target {
    match raw.trim().parse::<f64>() {
        Ok(page) => Target::from(page),
        Err(_) => Target::from(raw),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

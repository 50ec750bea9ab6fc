//! client-paging CLI
//!
//! Command-line interface for paging through a records file

use anyhow::Context;
use clap::Parser;
use client_paging::cli::{Cli, Runner};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level: tracing::Level = cli.effective_log_level().into();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);
    runner.run().context("client-paging failed")
}

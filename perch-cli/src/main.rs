//! perch - run overlay positioning scenarios.
//!
//! Reads a JSON scenario, runs its steps against an in-memory layout and
//! prints one JSON line per position change on stdout. Logs go to stderr.

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run a positioning scenario and print every position change.
#[derive(Parser, Debug)]
#[command(name = "perch", version, about)]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Pretty-print each report instead of one JSON object per line
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Running scenario {}", args.scenario.display());

    let scenario = scenario::load(&args.scenario)?;
    let reports = scenario::run(&scenario)?;

    for report in &reports {
        let line = if args.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
        .context("Failed to serialize report")?;
        println!("{}", line);
    }

    tracing::info!("{} position change(s)", reports.len());
    Ok(())
}

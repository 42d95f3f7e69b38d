//! # stockroom - bookstore inventory merge
//!
//! Loads the current inventory, merges a shipment into it, and writes the
//! updated inventory back out.
//!
//! ```text
//! stockroom <initial-inventory-file> <shipment-file> <output-file>
//!           [--log-level error|warn|info|debug|trace]
//! ```
//!
//! ## Configuration
//!
//! ```text
//! STOCKROOM_LOG    log filter directive        (default: "warn")
//! STOCKROOM_SYNC   fsync output before rename  (default: "true")
//! ```
//!
//! `--log-level` overrides `STOCKROOM_LOG`. Logs go to stderr; the run
//! report goes to stdout.
//!
//! ## Exit codes
//!
//! ```text
//! 0  success
//! 1  wrong arguments
//! 2  inventory file empty          5  shipment file empty
//! 3  inventory file missing        6  shipment file missing
//! 4  inventory file malformed      7  shipment file malformed
//! 8  output file not writable
//! ```
//!
//! ## Example
//!
//! ```text
//! $ stockroom inventory.txt shipment.txt inventory.new
//! 1 books loaded.
//! Number of books in inventory: 1
//! 1 books updated
//! 1 books added.
//! Number of books in inventory: 2
//! Inventory written to inventory.new
//! ```

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use config::Config;
use restock::{exit_code, LoadReport, MergeStats, Progress, RunPaths};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Merge a shipment into a bookstore inventory.
#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about)]
struct Cli {
    /// Current inventory file.
    initial_inventory: PathBuf,

    /// Shipment file to merge in.
    shipment: PathBuf,

    /// Where to write the updated inventory.
    output: PathBuf,

    /// Log level; overrides STOCKROOM_LOG.
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

/// Prints the run report to stdout as each step finishes.
struct ConsoleReport;

impl Progress for ConsoleReport {
    fn loaded(&mut self, report: &LoadReport) {
        println!("{} books loaded.", report.loaded);
    }

    fn inventory_size(&mut self, size: usize) {
        println!("Number of books in inventory: {}", size);
    }

    fn merged(&mut self, stats: &MergeStats) {
        println!("{} books updated", stats.updated);
        println!("{} books added.", stats.added);
    }

    fn written(&mut self, path: &Path, _records: usize) {
        println!("Inventory written to {}", path.display());
    }
}

fn init_tracing(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter {:?}", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap's own usage exit code (2) would collide with "inventory empty"
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_code::SUCCESS,
                _ => exit_code::USAGE,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(exit_code::USAGE);
        }
    };
    if let Some(level) = cli.log_level {
        config.log_filter = level.to_filter_directive().to_string();
    }

    if let Err(e) = init_tracing(&config.log_filter) {
        eprintln!("error: {:#}", e);
        return ExitCode::from(exit_code::USAGE);
    }
    debug!(?config, "starting");

    let paths = RunPaths {
        inventory: cli.initial_inventory,
        shipment: cli.shipment,
        output: cli.output,
    };

    match restock::run(&paths, &config, &mut ConsoleReport) {
        Ok(summary) => {
            debug!(?summary, "run complete");
            ExitCode::from(exit_code::SUCCESS)
        }
        Err(e) => {
            error!(stage = %e.stage, "{}", e.source);
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

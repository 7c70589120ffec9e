//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod export;
mod generate;
mod serve;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides};
use crate::logging;
use crate::protocol::Event;
use crate::source::SnapshotSource;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Tokensrc - Convert design variable snapshots into nested token trees
#[derive(Parser)]
#[command(name = "tks")]
#[command(about = "Tokensrc - Convert design variable snapshots into token trees and TypeScript")]
#[command(version)]
pub struct Cli {
    /// Path to tokensrc.toml (default: searched upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one export pass and print the resulting message as JSON
    Export {
        /// Variable snapshot (JSON with `variables` and `collections`)
        input: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Run one export pass and render TypeScript constants
    Generate {
        /// Variable snapshot (JSON with `variables` and `collections`)
        input: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix for exported constant names
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Answer JSON requests from stdin with JSON events on stdout, one per line
    Serve {
        /// Variable snapshot, re-read for every request
        input: PathBuf,
    },
}

/// Parse arguments, load config, and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    logging::init(config.log.level);

    let runtime = match tokio::runtime::Builder::new_multi_thread().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    runtime.block_on(async move {
        match cli.command {
            Commands::Export { input, output, compact } => {
                let overrides = CliOverrides { pretty: compact.then_some(false), ..Default::default() };
                merge_cli_overrides(&mut config, &overrides);
                export::run_export(&input, output.as_deref(), &config).await
            }
            Commands::Generate { input, output, prefix } => {
                let overrides = CliOverrides { export_prefix: prefix, ..Default::default() };
                merge_cli_overrides(&mut config, &overrides);
                if let Some(e) = config.validate().first() {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
                generate::run_generate(&input, output.as_deref(), &config).await
            }
            Commands::Serve { input } => serve::run_serve(&input).await,
        }
    })
}

/// Load a snapshot, turning a read failure into the error event the pass would emit.
pub(crate) fn load_snapshot(input: &Path) -> Result<SnapshotSource, Event> {
    SnapshotSource::from_path(input).map_err(|e| {
        tracing::error!(path = %input.display(), error = %e, "failed to load snapshot");
        Event::error(e.to_string())
    })
}

/// Write `content` to `output`, or stdout when no path is given.
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<(), std::io::Error> {
    match output {
        Some(path) => std::fs::write(path, content),
        None => {
            println!("{}", content.trim_end_matches('\n'));
            Ok(())
        }
    }
}

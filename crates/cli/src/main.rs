//! # noti
//!
//! Command-line entry point.
//!
//! Provides:
//! - Single-shot notifications (`long-task && noti "done"`)
//! - Stream mode: filter stdin lines into notifications (`long-task | noti`)
//! - `init`, `destination list` and `validate` helpers

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_destination, run_init, run_send, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    debug!(version = env!("CARGO_PKG_VERSION"), "noti starting");

    let result = match &cli.command {
        Some(Commands::Init(args)) => run_init(&cli.config, args).await,
        Some(Commands::Destination { command }) => run_destination(*command),
        Some(Commands::Validate(args)) => run_validate(&cli.config_path(), args),
        None => run_send(&cli).await,
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging (stderr) and the optional metrics endpoint
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: (cli.metrics_port != 0).then_some(cli.metrics_port),
        default_log_level: default_log_level.to_string(),
        force_level: cli.quiet,
    })
}

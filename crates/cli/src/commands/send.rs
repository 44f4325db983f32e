//! Default command: send a message, or stream stdin.

use anyhow::{Context, Result};
use stream_filter::StreamFilter;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::pipeline::{Mode, Pipeline, PipelineConfig};

/// Execute the default (no subcommand) command
pub async fn run_send(cli: &Cli) -> Result<()> {
    let path = cli.config_path();
    info!(config = %path.display(), "Loading configuration");

    let config = config_loader::ConfigLoader::load_from_path(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let mode = Mode::resolve(config.stream.enabled, cli.message.clone())?;

    info!(
        destinations = config.destinations.len(),
        stream = config.stream.enabled,
        matching = ?config.stream.matching,
        "Configuration loaded"
    );

    let pipeline = Pipeline::new(PipelineConfig { config })?;

    let stats = match mode {
        Mode::Single(message) => pipeline.send_once(&message).await?,
        Mode::Stream => {
            let filter = StreamFilter::stdin(pipeline.stream_config())
                .context("Failed to start reading stdin")?;
            pipeline.run_stream(filter, shutdown_signal()).await?
        }
    };

    stats.log_summary();
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

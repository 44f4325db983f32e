//! `init` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use config_loader::{starter, ConfigLoader, Starter};
use tracing::{info, warn};

use crate::cli::{InitArgs, InitDestination};
use crate::error::CliError;

/// Execute the `init` command
pub async fn run_init(path: &Path, args: &InitArgs) -> Result<()> {
    write_starter(path, args).await?;
    println!("Created {}", path.display());
    Ok(())
}

/// Write the starter config for `args` to `path`, never overwriting
async fn write_starter(path: &Path, args: &InitArgs) -> Result<()> {
    if tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to check {}", path.display()))?
    {
        return Err(CliError::config_conflict(path).into());
    }

    let kind = starter_kind(args);
    let rendered = ConfigLoader::render_for_path(&starter(kind), path)
        .with_context(|| format!("Failed to render config for {}", path.display()))?;

    tokio::fs::write(path, rendered)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), starter = ?kind, "Starter configuration written");
    Ok(())
}

fn starter_kind(args: &InitArgs) -> Starter {
    match (args.destination, args.custom) {
        (InitDestination::Desktop, custom) => {
            if custom {
                warn!("--custom has no effect for desktop destinations");
            }
            Starter::Desktop
        }
        (InitDestination::Webhook, false) => Starter::Webhook,
        (InitDestination::Webhook, true) => Starter::CustomWebhook,
    }
}

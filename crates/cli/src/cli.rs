//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG: &str = "noti.toml";

/// noti - send a notification when a command finishes, or for matching lines on stdin
#[derive(Parser, Debug)]
#[command(
    name = "noti",
    author,
    version,
    about = "Send notifications to the desktop and webhooks",
    long_about = "Send a notification to every configured destination.\n\n\
                  With a message argument, the message is sent once:\n\
                  \n    long-task && noti \"long-task finished\"\n\n\
                  With `stream.enabled = true` in the config, lines are read from stdin,\n\
                  filtered by `stream.matching` and sent as they arrive:\n\
                  \n    long-task | noti"
)]
pub struct Cli {
    /// The message to send (omit when streaming from stdin)
    pub message: Option<String>,

    /// Path to configuration file (TOML, JSON or YAML)
    #[arg(
        short,
        long,
        default_value = DEFAULT_CONFIG,
        global = true,
        env = "NOTI_CONFIG"
    )]
    pub config: PathBuf,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "NOTI_VERBOSE")]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (logs always go to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "NOTI_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "NOTI_METRICS_PORT")]
    pub metrics_port: u16,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config file to read.
    ///
    /// When the default `noti.toml` is absent, an existing `noti.yaml` or
    /// `noti.yml` next to it is used instead.
    pub fn config_path(&self) -> PathBuf {
        locate_config(&self.config, self.config == Path::new(DEFAULT_CONFIG))
    }
}

fn locate_config(requested: &Path, is_default: bool) -> PathBuf {
    if !is_default || requested.exists() {
        return requested.to_path_buf();
    }
    ["yaml", "yml"]
        .iter()
        .map(|ext| requested.with_extension(ext))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| requested.to_path_buf())
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter configuration file to the --config path
    Init(InitArgs),

    /// Commands about supported notification destinations
    Destination {
        #[command(subcommand)]
        command: DestinationCommand,
    },

    /// Validate configuration file without sending anything
    Validate(ValidateArgs),
}

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Where notifications should go
    #[arg(value_enum)]
    pub destination: InitDestination,

    /// Use a custom webhook payload template (webhook only)
    #[arg(long)]
    pub custom: bool,
}

/// Destination kinds `init` can write a starter for
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitDestination {
    /// Desktop notifications
    Desktop,
    /// Webhook notifications (Discord by default)
    Webhook,
}

/// `destination` subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DestinationCommand {
    /// List all available destination types
    List,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

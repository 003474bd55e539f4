//! CLI parse: clap types for webtics. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// WebTics CLI - drive a telemetry backend from the shell
#[derive(Parser)]
#[command(name = "webtics")]
#[command(about = "Send WebTics telemetry sessions and events to a collection backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend host, overriding configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Backend base path, overriding configuration
    #[arg(long)]
    pub base_path: Option<String>,

    /// Record requests in memory and print them instead of sending
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging (default: off)
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the event catalog
    Catalog {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Register the event catalog with the backend
    Register {
        /// Player id for the metric session (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Log one event inside a fresh play session
    Log {
        /// Player id for the metric session (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Event type code
        #[arg(long = "type", allow_negative_numbers = true)]
        event_type: i32,
        /// Event subtype code
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        subtype: i32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        x: i32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        y: i32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z: i32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        magnitude: f64,
        /// Free-form data attached to the event
        #[arg(long)]
        data: Option<String>,
        /// Send only when debug mode is on
        #[arg(long)]
        debug_only: bool,
    },
    /// Replay events from a JSON lines file inside one play session
    Replay {
        /// Player id for the metric session (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// File with one event record per line
        file: PathBuf,
    },
    /// Query or set a player's authorisation
    Auth {
        /// Player id
        id: String,
        /// Set authorisation instead of querying it
        #[arg(long)]
        set: Option<bool>,
    },
    /// Request parameters from the backend
    Params {
        /// Player id for the metric session (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Query forwarded verbatim
        query: String,
    },
    /// Show the effective configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

impl Commands {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Catalog { .. } => "catalog",
            Commands::Register { .. } => "register",
            Commands::Log { .. } => "log",
            Commands::Replay { .. } => "replay",
            Commands::Auth { .. } => "auth",
            Commands::Params { .. } => "params",
            Commands::Config { .. } => "config",
        }
    }
}

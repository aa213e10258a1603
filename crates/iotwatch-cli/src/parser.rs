//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Terminal client for the iotwatch monitoring platform.
#[derive(Parser)]
#[command(name = "iotwatch")]
#[command(about = "Monitor devices, sensors and alarms from the terminal")]
#[command(version)]
pub struct Cli {
    /// Base URL of the platform API
    #[arg(long = "api-url", env = "IOTWATCH_API_BASE_URL", global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "IOTWATCH_TIMEOUT_SECS", global = true)]
    pub timeout: Option<u64>,

    /// File holding the signed-in session
    #[arg(long = "session-file", env = "IOTWATCH_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

//! Hoist CLI
//!
//! Command-line interface for the Hoist server: check it, trigger
//! deployment runs and read their logs.

mod commands;
mod config;
mod logs;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hoist")]
#[command(about = "Local deployment control plane CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "HOIST_SERVER_URL", default_value = "http://127.0.0.1:3002")]
    server_url: String,

    /// Log root used by the server (for reading run logs)
    #[arg(long, env = "HOIST_LOG_DIR", default_value = "logs/backend")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        log_dir: cli.log_dir,
    };

    handle_command(cli.command, &config).await
}

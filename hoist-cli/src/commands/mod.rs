//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod run;
mod service;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the server is up
    Health,
    /// Show service name, version and endpoints
    Info,
    /// Start a deployment pipeline run
    Trigger {
        /// Follow the run's log until it finishes
        #[arg(short, long)]
        follow: bool,
    },
    /// Print the log of a run
    Logs {
        /// Run ID returned by `trigger`
        run_id: String,

        /// Keep printing new lines until the run finishes
        #[arg(short, long)]
        follow: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Health => service::health(config).await,
        Commands::Info => service::info(config).await,
        Commands::Trigger { follow } => run::trigger(config, follow).await,
        Commands::Logs { run_id, follow } => run::logs(config, &run_id, follow).await,
    }
}

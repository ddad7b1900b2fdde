//! Run command handlers
//!
//! Triggering runs and reading their logs. Logs are read straight from the
//! server's log directory, so these commands only work on the same machine.

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use hoist_client::HoistClient;
use hoist_core::domain::log::run_log_path;
use hoist_core::domain::run::RunId;

use crate::config::Config;
use crate::logs::{follow_log, print_log_line};

/// Trigger a pipeline run, optionally following it to completion
pub async fn trigger(config: &Config, follow: bool) -> Result<()> {
    let client = HoistClient::new(&config.server_url);
    let ack = client.trigger().await?;

    println!(
        "{} Run {} accepted",
        "✓".green(),
        ack.run_id.to_string().bold()
    );
    println!("  Log: {}", ack.log_hint.dimmed());

    if follow {
        println!();
        finish(&ack.run_id, Path::new(&ack.log_hint)).await?;
    }

    Ok(())
}

/// Print a run's log from the configured log directory
pub async fn logs(config: &Config, run_id: &str, follow: bool) -> Result<()> {
    let run_id: RunId = run_id.parse()?;
    let path = run_log_path(&config.log_dir, &run_id);

    if follow {
        return finish(&run_id, &path).await;
    }

    let contents = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("No log for run {} at {}", run_id, path.display()))?;

    for line in contents.lines() {
        print_log_line(line);
    }
    Ok(())
}

async fn finish(run_id: &RunId, path: &Path) -> Result<()> {
    if follow_log(path).await? {
        Ok(())
    } else {
        anyhow::bail!("Run {} failed", run_id)
    }
}

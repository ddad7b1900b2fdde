//! Service command handlers

use anyhow::Result;
use colored::*;
use hoist_client::HoistClient;

use crate::config::Config;

/// Check server health
pub async fn health(config: &Config) -> Result<()> {
    let client = HoistClient::new(&config.server_url);
    let health = client.health().await?;

    println!(
        "{} {} ({})",
        "●".green(),
        health.service.bold(),
        health.status.green()
    );
    Ok(())
}

/// Show service metadata
pub async fn info(config: &Config) -> Result<()> {
    let client = HoistClient::new(&config.server_url);
    let info = client.info().await?;

    println!("{} {}", info.service.bold(), info.version.dimmed());
    println!();
    for (endpoint, description) in &info.endpoints {
        println!("  {:<16} {}", endpoint.cyan(), description);
    }
    Ok(())
}

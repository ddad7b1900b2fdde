//! Hoist Server
//!
//! Listens for trigger requests and runs the local deployment pipeline in
//! the background, one task per run.

use std::sync::Arc;

use anyhow::{Context, Result};
use hoist_core::domain::step::Pipeline;
use hoist_runner::{PipelineExecutor, ShellCommandRunner};
use hoist_server::api::{self, AppState};
use hoist_server::config::Config;
use hoist_server::process_log::ProcessLog;
use hoist_server::service::Dispatcher;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hoist_server=info,hoist_runner=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let process_log = Arc::new(ProcessLog::create(&config.log_dir));
    process_log.log(&format!(
        "Starting {} on {}",
        config.service_name, config.bind_addr
    ));
    process_log.log(&format!("Log file: {}", process_log.path().display()));
    process_log.log(&format!(
        "Project directory: {}",
        config.project_dir.display()
    ));

    let runner = Arc::new(ShellCommandRunner::new(&config.project_dir));
    let dispatcher = Dispatcher::new(
        config.log_dir.clone(),
        Pipeline::default(),
        PipelineExecutor::new(runner),
        Arc::clone(&process_log),
    );

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(config.service_name.as_str(), dispatcher));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    process_log.log("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C
///
/// Runs still in flight are dropped with the runtime, which kills their
/// child processes.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

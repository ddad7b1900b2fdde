//! Server configuration
//!
//! Defines where the server listens, which directory pipeline steps run in
//! and where logs are written.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on (e.g., "127.0.0.1:3002")
    pub bind_addr: String,

    /// Project root; working directory of every pipeline step
    pub project_dir: PathBuf,

    /// Root of the process log and of the per-run log directories
    pub log_dir: PathBuf,

    /// Name reported by the health and metadata endpoints
    pub service_name: String,
}

impl Config {
    /// Creates a configuration for `project_dir` with default settings
    pub fn new(project_dir: PathBuf) -> Self {
        let log_dir = project_dir.join("logs").join("backend");
        Self {
            bind_addr: "127.0.0.1:3002".to_string(),
            project_dir,
            log_dir,
            service_name: "hoist".to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - HOIST_BIND_ADDR (optional, default: 127.0.0.1:3002)
    /// - HOIST_PROJECT_DIR (optional, default: current directory)
    /// - HOIST_LOG_DIR (optional, default: <project>/logs/backend)
    /// - HOIST_SERVICE_NAME (optional, default: hoist)
    pub fn from_env() -> anyhow::Result<Self> {
        let project_dir = match std::env::var("HOIST_PROJECT_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir().context("Failed to resolve current directory")?,
        };

        let mut config = Self::new(project_dir);

        if let Ok(addr) = std::env::var("HOIST_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Ok(dir) = std::env::var("HOIST_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        if let Ok(name) = std::env::var("HOIST_SERVICE_NAME") {
            config.service_name = name;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("bind_addr '{}' is not a valid socket address", self.bind_addr);
        }

        if !self.project_dir.is_dir() {
            anyhow::bail!(
                "project_dir '{}' is not a directory",
                self.project_dir.display()
            );
        }

        if self.log_dir.as_os_str().is_empty() {
            anyhow::bail!("log_dir cannot be empty");
        }

        if self.service_name.trim().is_empty() {
            anyhow::bail!("service_name cannot be empty");
        }

        Ok(())
    }
}

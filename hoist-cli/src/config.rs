//! CLI configuration

use std::path::PathBuf;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Hoist server
    pub server_url: String,
    /// Root directory holding the per-run log directories
    pub log_dir: PathBuf,
}

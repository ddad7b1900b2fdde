//! Process-level log
//!
//! One file per server start, `hoist-server-YYYYmmdd-HHMMSS.log` in the log
//! root. It records startup, shutdown and the lifecycle of every run. The
//! path is fixed when the log is created and handed to whoever needs it.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use hoist_core::domain::log::LogLine;
use hoist_runner::LogFile;
use tracing::{info, warn};

/// Shared append-only log for server events
#[derive(Debug)]
pub struct ProcessLog {
    path: PathBuf,
    file: Mutex<LogFile>,
}

impl ProcessLog {
    /// Creates the log for a server starting now
    pub fn create(log_dir: &Path) -> Self {
        let name = format!("hoist-server-{}.log", Local::now().format("%Y%m%d-%H%M%S"));
        Self::at(log_dir.join(name))
    }

    /// Uses an explicit file path
    pub fn at(path: PathBuf) -> Self {
        Self {
            file: Mutex::new(LogFile::new(path.clone())),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a message to the file and to process output
    pub fn log(&self, message: &str) {
        info!("{}", message);

        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = file.append(&LogLine::now(message)) {
            warn!("Process log write failed: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_named_after_start_time() {
        let dir = tempfile::tempdir().unwrap();
        let log = ProcessLog::create(dir.path());

        let name = log.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("hoist-server-"));
        assert!(name.ends_with(".log"));
        // hoist-server- + YYYYmmdd-HHMMSS + .log
        assert_eq!(name.len(), "hoist-server-".len() + 15 + ".log".len());
    }

    #[test]
    fn test_log_creates_directory_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = ProcessLog::at(dir.path().join("nested").join("server.log"));

        log.log("Starting hoist on 127.0.0.1:3002");
        log.log("Server stopped");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let messages: Vec<&str> = contents.lines().map(LogLine::message_of).collect();
        assert_eq!(
            messages,
            vec!["Starting hoist on 127.0.0.1:3002", "Server stopped"]
        );
    }
}

//! Log line types

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::run::RunId;

/// Timestamp format used by every log line the system writes
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File name of a run's log inside its directory
pub const RUN_LOG_FILE: &str = "pipeline.log";

/// Prefix of the last line of a successful run
pub const RUN_SUCCEEDED_PREFIX: &str = "Pipeline succeeded in";

/// Prefix of the last line of a failed run
pub const RUN_FAILED_PREFIX: &str = "Pipeline failed after";

/// A timestamped line destined for a durable log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogLine {
    /// Stamps a message with the current wall-clock time
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
        }
    }

    /// Renders the line as `[timestamp] message`
    pub fn render(&self) -> String {
        format!(
            "[{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.message
        )
    }

    /// Extracts the message from a rendered `[timestamp] message` line
    ///
    /// Lines without a timestamp prefix are returned unchanged.
    pub fn message_of(rendered: &str) -> &str {
        rendered
            .strip_prefix('[')
            .and_then(|rest| rest.split_once("] "))
            .map_or(rendered, |(_, message)| message)
    }
}

/// Location of a run's log: `<log_root>/<run_id>/pipeline.log`
pub fn run_log_path(log_root: &Path, run_id: &RunId) -> PathBuf {
    log_root.join(run_id.as_str()).join(RUN_LOG_FILE)
}

/// Outcome announced by a run's final log line, if `message` is one
pub fn run_outcome(message: &str) -> Option<bool> {
    if message.starts_with(RUN_SUCCEEDED_PREFIX) {
        Some(true)
    } else if message.starts_with(RUN_FAILED_PREFIX) {
        Some(false)
    } else {
        None
    }
}

//! Run logging
//!
//! Every run writes to `<log_root>/<run_id>/pipeline.log`. The file is opened
//! lazily on the first line, and each line is mirrored to process output
//! through `tracing`. One task owns a run, so a `RunLogger` is never shared
//! and needs no locking.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hoist_core::domain::log::{LogLine, run_log_path};
use hoist_core::domain::run::RunId;
use tracing::{info, warn};

use crate::sink::LineSink;

/// Append-only text log, created on first write
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: Option<File>,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a rendered line, creating parent directories if needed
    pub fn append(&mut self, line: &LogLine) -> Result<()> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create log directory {}", parent.display())
                    })?;
                }
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .with_context(|| format!("Failed to open log file {}", self.path.display()))?
            }
        };
        let file = self.file.insert(file);

        writeln!(file, "{}", line.render())
            .with_context(|| format!("Failed to write log file {}", self.path.display()))
    }
}

/// Log sink bound to one run
///
/// Writes each line to the run's log file and to process output.
#[derive(Debug)]
pub struct RunLogger {
    run_id: RunId,
    file: LogFile,
}

impl RunLogger {
    /// Creates the logger for `run_id` under `log_root`
    pub fn for_run(log_root: &Path, run_id: &RunId) -> Self {
        Self {
            run_id: run_id.clone(),
            file: LogFile::new(Self::log_path(log_root, run_id)),
        }
    }

    /// Location of a run's log file
    pub fn log_path(log_root: &Path, run_id: &RunId) -> PathBuf {
        run_log_path(log_root, run_id)
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Records one message
    ///
    /// A failing disk write is reported and otherwise ignored: the run keeps
    /// going and the line still reaches process output.
    pub fn write(&mut self, message: &str) {
        info!(run_id = %self.run_id, "{}", message);

        if let Err(e) = self.file.append(&LogLine::now(message)) {
            warn!(run_id = %self.run_id, "Run log write failed: {:#}", e);
        }
    }
}

impl LineSink for RunLogger {
    fn emit(&mut self, line: &str) {
        self.write(line);
    }
}

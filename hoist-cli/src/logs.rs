//! Run log reading
//!
//! Run logs are plain `[timestamp] message` files that only ever grow. The
//! tail keeps a byte offset and only hands out complete lines, so a line the
//! server is still writing is picked up on the next poll.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use hoist_core::domain::log::{LogLine, run_outcome};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// What a run log line reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    StepStarted,
    StepOk,
    StepFailed,
    RunSucceeded,
    RunFailed,
    Output,
}

/// Classifies a log message (without its timestamp)
pub fn classify(message: &str) -> LineKind {
    match run_outcome(message) {
        Some(true) => return LineKind::RunSucceeded,
        Some(false) => return LineKind::RunFailed,
        None => {}
    }

    if message.starts_with("Starting step ") {
        LineKind::StepStarted
    } else if message.starts_with("Step '") && message.ends_with("' OK") {
        LineKind::StepOk
    } else if message.starts_with("Step '") && message.contains("' FAILED (") {
        LineKind::StepFailed
    } else {
        LineKind::Output
    }
}

/// Prints a rendered log line, highlighting markers
pub fn print_log_line(line: &str) {
    let styled = match classify(LogLine::message_of(line)) {
        LineKind::StepStarted => line.cyan(),
        LineKind::StepOk => line.green(),
        LineKind::StepFailed => line.red(),
        LineKind::RunSucceeded => line.green().bold(),
        LineKind::RunFailed => line.red().bold(),
        LineKind::Output => line.normal(),
    };
    println!("{}", styled);
}

/// Incremental reader over a growing log file
pub struct LogTail {
    path: PathBuf,
    offset: usize,
}

impl LogTail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            offset: 0,
        }
    }

    /// Returns the complete lines written since the previous poll
    ///
    /// A log that does not exist yet reads as empty.
    pub async fn poll(&mut self) -> Result<Vec<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        if contents.len() < self.offset {
            self.offset = 0;
        }

        let fresh = &contents[self.offset..];
        let Some(end) = fresh.rfind('\n') else {
            return Ok(Vec::new());
        };

        let complete = &fresh[..=end];
        self.offset += complete.len();
        Ok(complete.lines().map(str::to_string).collect())
    }
}

/// Prints a run log as it grows until the run's final line
///
/// Returns whether the run succeeded.
pub async fn follow_log(path: &Path) -> Result<bool> {
    let mut tail = LogTail::new(path);

    loop {
        for line in tail.poll().await? {
            print_log_line(&line);
            if let Some(success) = run_outcome(LogLine::message_of(&line)) {
                return Ok(success);
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_classify_markers() {
        assert_eq!(
            classify("Starting step 1/7 'setup': make setup"),
            LineKind::StepStarted
        );
        assert_eq!(classify("Step 'setup' OK"), LineKind::StepOk);
        assert_eq!(
            classify("Step 'image-build' FAILED (exit code 2)"),
            LineKind::StepFailed
        );
        assert_eq!(classify("Pipeline succeeded in 41.0s"), LineKind::RunSucceeded);
        assert_eq!(classify("Pipeline failed after 3.5s"), LineKind::RunFailed);
        assert_eq!(classify("make: Nothing to be done"), LineKind::Output);
    }

    #[tokio::test]
    async fn test_tail_returns_only_new_complete_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.log");
        let mut tail = LogTail::new(&path);

        assert!(tail.poll().await.unwrap().is_empty());

        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "[t] one\n[t] tw").unwrap();
        assert_eq!(tail.poll().await.unwrap(), vec!["[t] one"]);

        write!(file, "o\n[t] three\n").unwrap();
        assert_eq!(tail.poll().await.unwrap(), vec!["[t] two", "[t] three"]);
        assert!(tail.poll().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_follow_stops_at_final_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.log");
        std::fs::write(
            &path,
            "[t] Starting step 1/1 'step-1': false\n\
             [t] Step 'step-1' FAILED (exit code 1)\n\
             [t] Pipeline failed after 0.0s\n",
        )
        .unwrap();

        assert!(!follow_log(&path).await.unwrap());
    }
}

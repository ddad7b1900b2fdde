//! Command runner
//!
//! Runs one external command through `sh -c` in the project directory. The
//! command's stderr is redirected into its stdout inside the shell, so the
//! runner reads a single stream and lines keep the order the shell wrote
//! them in.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use async_trait::async_trait;
use hoist_core::domain::step::StepResult;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::sink::LineSink;

/// Runs a single command and reports its outcome
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `command`, passing every output line to `on_line` as it arrives
    ///
    /// Never fails: launch and read faults come back as an unsuccessful
    /// `StepResult` whose output is the fault description.
    async fn run(&self, command: &str, on_line: &mut dyn LineSink) -> StepResult;
}

/// Runs commands with the system shell
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    working_dir: PathBuf,
}

impl ShellCommandRunner {
    /// Creates a runner executing every command in `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    async fn run_inner(
        &self,
        command: &str,
        on_line: &mut dyn LineSink,
        lines: &mut Vec<String>,
    ) -> Result<ExitStatus> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(format!("exec 2>&1\n{}", command))
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to launch '{}'", command))?;

        let stdout = child
            .stdout
            .take()
            .context("Child process has no stdout pipe")?;
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .with_context(|| format!("Failed to read output of '{}'", command))?;
            if read == 0 {
                break;
            }

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end_matches('\n').trim_end_matches('\r');
            on_line.emit(line);
            lines.push(line.to_string());
        }

        child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for '{}'", command))
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(&self, command: &str, on_line: &mut dyn LineSink) -> StepResult {
        debug!(cmd = %command, cwd = %self.working_dir.display(), "launching command");

        let mut lines = Vec::new();
        match self.run_inner(command, on_line, &mut lines).await {
            Ok(status) => {
                info!(
                    cmd = %command,
                    exit_code = ?status.code(),
                    success = status.success(),
                    "command exited"
                );
                StepResult {
                    command: command.to_string(),
                    success: status.success(),
                    output: lines.join("\n"),
                    exit_code: status.code(),
                }
            }
            Err(e) => {
                warn!(cmd = %command, error = %format!("{:#}", e), "command faulted");
                StepResult::fault(command, format!("{:#}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    fn runner() -> ShellCommandRunner {
        ShellCommandRunner::new(std::env::temp_dir())
    }

    #[tokio::test]
    async fn test_success_captures_output() {
        let mut seen: Vec<String> = Vec::new();
        let result = runner().run("echo one; echo two", &mut seen).await;

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.output, "one\ntwo");
        assert_eq!(seen, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let mut seen: Vec<String> = Vec::new();
        let result = runner().run("echo partial; exit 3", &mut seen).await;

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.output, "partial");
    }

    #[tokio::test]
    async fn test_stderr_is_merged_in_order() {
        let mut seen: Vec<String> = Vec::new();
        let result = runner()
            .run("echo out; echo err >&2; echo out-again", &mut seen)
            .await;

        assert!(result.success);
        assert_eq!(seen, vec!["out", "err", "out-again"]);
    }

    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "present").unwrap();

        let runner = ShellCommandRunner::new(dir.path());
        let result = runner.run("cat marker.txt", &mut NullSink).await;

        assert!(result.success);
        assert_eq!(result.output, "present");
    }

    #[tokio::test]
    async fn test_launch_failure_is_contained() {
        let runner = ShellCommandRunner::new("/definitely/not/a/real/dir");
        let mut seen: Vec<String> = Vec::new();
        let result = runner.run("true", &mut seen).await;

        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert!(result.output.contains("Failed to launch"));
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_runs_capture_identical_output() {
        let runner = runner();
        let command = "printf 'a\\nb\\n'; echo c >&2";

        let mut collected: Vec<String> = Vec::new();
        let first = runner.run(command, &mut collected).await;
        let second = runner.run(command, &mut NullSink).await;

        assert_eq!(first.output, second.output);
        assert_eq!(first.output, "a\nb\nc");
    }

    #[tokio::test]
    async fn test_last_line_without_newline_and_crlf() {
        let mut seen: Vec<String> = Vec::new();
        let result = runner().run("printf 'x\\r\\ny'", &mut seen).await;

        assert!(result.success);
        assert_eq!(seen, vec!["x", "y"]);
    }
}

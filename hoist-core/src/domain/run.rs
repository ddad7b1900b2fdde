//! Run domain types

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::step::{Step, StepResult};

/// Error summary reported on every failed run
pub const FAILURE_SENTINEL: &str = "one or more commands failed";

/// Length of a generated run identifier
pub const RUN_ID_LEN: usize = 8;

/// Short unique token identifying one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Generates a fresh 8-character identifier
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(RUN_ID_LEN);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid run id '{0}': expected 8 alphanumeric characters")]
pub struct InvalidRunId(pub String);

impl FromStr for RunId {
    type Err = InvalidRunId;

    /// Accepts only tokens shaped like generated ids so they are safe to use
    /// as directory names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == RUN_ID_LEN && s.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidRunId(s.to_string()))
        }
    }
}

/// Lifecycle status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Success,
    Failed,
}

/// One pipeline invocation
///
/// Owned by the task executing it. Once `status` leaves `Pending` the run is
/// frozen: further results are ignored.
#[derive(Debug, Clone)]
pub struct Run {
    pub id: RunId,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub steps: Vec<Step>,
    /// Index of the next step to execute
    pub current_step: usize,
    pub status: RunStatus,
    pub duration: Duration,
    pub results: Vec<StepResult>,
}

impl Run {
    pub fn new(id: RunId, steps: Vec<Step>) -> Self {
        Self {
            id,
            started_at: chrono::Utc::now(),
            steps,
            current_step: 0,
            status: RunStatus::Pending,
            duration: Duration::ZERO,
            results: Vec::new(),
        }
    }

    /// Next step to execute, if the run is still going
    pub fn next_step(&self) -> Option<&Step> {
        if self.is_terminal() {
            return None;
        }
        self.steps.get(self.current_step)
    }

    /// Records the outcome of the current step and advances
    pub fn record(&mut self, result: StepResult) {
        if self.is_terminal() {
            return;
        }
        self.results.push(result);
        self.current_step += 1;
    }

    /// Whether a recorded step has failed
    pub fn has_failure(&self) -> bool {
        self.results.iter().any(|r| !r.success)
    }

    /// Sets the terminal status from the recorded results
    pub fn finish(&mut self, elapsed: Duration) {
        if self.is_terminal() {
            return;
        }
        self.duration = elapsed;
        self.status = if !self.has_failure() && self.results.len() == self.steps.len() {
            RunStatus::Success
        } else {
            RunStatus::Failed
        };
    }

    pub fn is_terminal(&self) -> bool {
        self.status != RunStatus::Pending
    }

    /// Converts a finished run into its aggregate result
    ///
    /// `output` is the already cleaned and bounded output excerpt.
    pub fn into_result(self, output: String) -> PipelineResult {
        let success = self.status == RunStatus::Success;
        PipelineResult {
            success,
            run_id: self.id,
            duration_seconds: self.duration.as_secs_f64(),
            output,
            error: (!success).then(|| FAILURE_SENTINEL.to_string()),
            steps: self.results,
        }
    }
}

/// Aggregate outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,
    pub run_id: RunId,
    pub duration_seconds: f64,
    /// Trailing excerpt of the combined step output
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Results of the steps that actually executed
    pub steps: Vec<StepResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(command: &str) -> StepResult {
        StepResult {
            command: command.to_string(),
            success: true,
            output: String::new(),
            exit_code: Some(0),
        }
    }

    fn two_step_run() -> Run {
        Run::new(
            RunId::generate(),
            vec![Step::new("a", "true"), Step::new("b", "true")],
        )
    }

    #[test]
    fn test_generated_ids_are_short_and_distinct() {
        let a = RunId::generate();
        let b = RunId::generate();
        assert_eq!(a.as_str().len(), RUN_ID_LEN);
        assert_ne!(a, b);
        assert!(a.as_str().parse::<RunId>().is_ok());
    }

    #[test]
    fn test_parse_rejects_path_like_ids() {
        assert!("../../etc".parse::<RunId>().is_err());
        assert!("abc".parse::<RunId>().is_err());
        assert!("abcd/123".parse::<RunId>().is_err());
    }

    #[test]
    fn test_run_succeeds_when_every_step_succeeds() {
        let mut run = two_step_run();
        assert_eq!(run.next_step().map(|s| s.name.as_str()), Some("a"));
        run.record(ok("true"));
        run.record(ok("true"));
        assert!(run.next_step().is_none());
        run.finish(Duration::from_millis(1500));

        assert_eq!(run.status, RunStatus::Success);
        let result = run.into_result(String::new());
        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.duration_seconds, 1.5);
    }

    #[test]
    fn test_run_with_skipped_steps_fails() {
        let mut run = two_step_run();
        run.record(StepResult {
            exit_code: Some(2),
            success: false,
            ..ok("false")
        });
        run.finish(Duration::from_secs(1));

        let result = run.into_result(String::new());
        assert!(!result.success);
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.error.as_deref(), Some(FAILURE_SENTINEL));
    }

    #[test]
    fn test_terminal_run_is_frozen() {
        let mut run = two_step_run();
        run.record(ok("true"));
        run.finish(Duration::from_secs(1));
        run.record(ok("true"));
        run.finish(Duration::from_secs(9));

        assert_eq!(run.results.len(), 1);
        assert_eq!(run.status, RunStatus::Failed);
        assert_eq!(run.duration, Duration::from_secs(1));
    }

    #[test]
    fn test_result_serialization_omits_error_on_success() {
        let mut run = Run::new(RunId::generate(), vec![]);
        run.finish(Duration::ZERO);
        let json = serde_json::to_value(run.into_result(String::new())).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
    }
}

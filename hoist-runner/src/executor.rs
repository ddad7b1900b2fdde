//! Pipeline executor
//!
//! Drives the steps of one run through a `CommandRunner`:
//! - Steps run strictly in order, one at a time
//! - The first failing step ends the run; later steps never start
//! - Nothing is rolled back, earlier steps keep whatever they changed
//!
//! Every marker line and every output line goes to the run's sink in the
//! order it was produced.

use std::sync::Arc;
use std::time::Instant;

use hoist_core::domain::log::{RUN_FAILED_PREFIX, RUN_SUCCEEDED_PREFIX};
use hoist_core::domain::run::{PipelineResult, Run, RunId, RunStatus};
use hoist_core::domain::step::Step;
use tracing::{error, info};

use crate::command::CommandRunner;
use crate::output;
use crate::sink::LineSink;

/// Runs pipelines step by step
#[derive(Clone)]
pub struct PipelineExecutor {
    runner: Arc<dyn CommandRunner>,
}

impl PipelineExecutor {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Executes `steps` for run `run_id`, writing progress to `log`
    pub async fn execute(
        &self,
        run_id: RunId,
        steps: Vec<Step>,
        log: &mut dyn LineSink,
    ) -> PipelineResult {
        let started = Instant::now();
        let mut run = Run::new(run_id, steps);
        let total = run.steps.len();

        info!(run_id = %run.id, steps = total, "Starting pipeline");

        while let Some(step) = run.next_step().cloned() {
            log.emit(&format!(
                "Starting step {}/{} '{}': {}",
                run.current_step + 1,
                total,
                step.name,
                step.command
            ));

            let result = self.runner.run(&step.command, &mut *log).await;

            if result.success {
                log.emit(&format!("Step '{}' OK", step.name));
            } else {
                let code = result
                    .exit_code
                    .map_or_else(|| "none".to_string(), |c| c.to_string());
                log.emit(&format!("Step '{}' FAILED (exit code {})", step.name, code));
            }

            run.record(result);
            if run.has_failure() {
                break;
            }
        }

        let elapsed = started.elapsed();
        run.finish(elapsed);

        let seconds = elapsed.as_secs_f64();
        if run.status == RunStatus::Success {
            info!(run_id = %run.id, "{} {:.1}s", RUN_SUCCEEDED_PREFIX, seconds);
            log.emit(&format!("{} {:.1}s", RUN_SUCCEEDED_PREFIX, seconds));
        } else {
            error!(
                run_id = %run.id,
                executed = run.results.len(),
                "{} {:.1}s", RUN_FAILED_PREFIX, seconds
            );
            log.emit(&format!("{} {:.1}s", RUN_FAILED_PREFIX, seconds));
        }

        let excerpt = output::aggregate(run.results.iter().map(|r| r.output.as_str()));
        run.into_result(excerpt)
    }
}

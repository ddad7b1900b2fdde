//! Run dispatching
//!
//! Turns a trigger into a background run: allocate an id, bind a run logger,
//! spawn the executor on its own task and hand back the acknowledgement. The
//! spawned task owns the run until it finishes; the dispatcher only keeps the
//! id it returned.
//!
//! Runs are not coordinated. Two triggers in a row start two runs that share
//! the project directory and the tooling it invokes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use hoist_core::domain::run::{PipelineResult, RunId};
use hoist_core::domain::step::Pipeline;
use hoist_core::dto::trigger::{AckStatus, TriggerAck};
use hoist_runner::{PipelineExecutor, RunLogger};
use tokio::task::JoinHandle;

use crate::process_log::ProcessLog;

/// A run that has been started
pub struct RunHandle {
    pub ack: TriggerAck,
    /// Completes with the run's result; dropping it leaves the run going
    pub task: JoinHandle<PipelineResult>,
}

/// Starts pipeline runs in the background
pub struct Dispatcher {
    log_root: PathBuf,
    pipeline: Pipeline,
    executor: PipelineExecutor,
    process_log: Arc<ProcessLog>,
}

impl Dispatcher {
    pub fn new(
        log_root: PathBuf,
        pipeline: Pipeline,
        executor: PipelineExecutor,
        process_log: Arc<ProcessLog>,
    ) -> Self {
        Self {
            log_root,
            pipeline,
            executor,
            process_log,
        }
    }

    pub fn log_root(&self) -> &Path {
        &self.log_root
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Starts a new run and returns without waiting for it
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&self) -> Result<RunHandle> {
        std::fs::create_dir_all(&self.log_root).with_context(|| {
            format!("Failed to create log directory {}", self.log_root.display())
        })?;

        let run_id = RunId::generate();
        let mut logger = RunLogger::for_run(&self.log_root, &run_id);
        let log_hint = logger.path().display().to_string();

        self.process_log.log(&format!(
            "[{}] Run accepted ({} steps), log: {}",
            run_id,
            self.pipeline.len(),
            log_hint
        ));

        let executor = self.executor.clone();
        let steps = self.pipeline.steps.clone();
        let process_log = Arc::clone(&self.process_log);
        let task_run_id = run_id.clone();

        let task = tokio::spawn(async move {
            let result = executor.execute(task_run_id, steps, &mut logger).await;

            process_log.log(&format!(
                "[{}] Run {} in {:.1}s ({} step(s) executed)",
                result.run_id,
                if result.success { "succeeded" } else { "failed" },
                result.duration_seconds,
                result.steps.len()
            ));

            result
        });

        Ok(RunHandle {
            ack: TriggerAck {
                run_id,
                status: AckStatus::Accepted,
                log_hint,
            },
            task,
        })
    }
}

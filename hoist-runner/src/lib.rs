//! Hoist Runner
//!
//! Executes deployment pipelines on the local machine.
//!
//! Architecture:
//! - Command runner: one shell command, output streamed line by line
//! - Pipeline executor: ordered steps, short-circuit on first failure
//! - Run logger: per-run append-only log file mirrored to process output
//!
//! Nothing in here returns an error for a failing command. Faults turn into
//! failed step results and end up in the run log.

pub mod command;
pub mod executor;
pub mod logger;
pub mod output;
pub mod sink;

pub use command::{CommandRunner, ShellCommandRunner};
pub use executor::PipelineExecutor;
pub use logger::{LogFile, RunLogger};
pub use sink::LineSink;

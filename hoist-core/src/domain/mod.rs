//! Core domain types
//!
//! These types describe a pipeline run from trigger to terminal status. They
//! are produced by the runner and serialized by the server and client.

pub mod log;
pub mod run;
pub mod step;

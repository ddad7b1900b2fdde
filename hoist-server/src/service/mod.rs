//! Service layer
//!
//! Business logic between the HTTP API and the runner.

pub mod dispatch;

pub use dispatch::{Dispatcher, RunHandle};

//! Hoist Server
//!
//! Local control plane that starts deployment pipeline runs over HTTP.
//!
//! Layers:
//! - Configuration: settings from environment with defaults
//! - Process log: startup, shutdown and run lifecycle events
//! - Services: run dispatching
//! - API: axum routes

pub mod api;
pub mod config;
pub mod process_log;
pub mod service;

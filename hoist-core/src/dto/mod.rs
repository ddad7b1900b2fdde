//! Data Transfer Objects for the HTTP API
//!
//! Payloads returned by the server and decoded by the client.

pub mod service;
pub mod trigger;

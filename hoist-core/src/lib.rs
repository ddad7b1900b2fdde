//! Hoist Core
//!
//! Core types shared by the Hoist deployment control plane.
//!
//! This crate contains:
//! - Domain types: runs, steps, pipeline results and log lines
//! - DTOs: payloads exchanged between the server, client and CLI

pub mod domain;
pub mod dto;

//! HTTP server for the arena tournament engine.
//!
//! The binary in `main.rs` wires these modules together; they are exposed as
//! a library so integration tests can drive the router in-process.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod seed;

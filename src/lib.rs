//! `fusion-matrix` library crate.
//!
//! The binary (`fm`) is a thin wrapper around this library so that:
//!
//! - scoring logic is testable without spawning processes
//! - the engine is reusable (e.g., a report service that renders narratives)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;

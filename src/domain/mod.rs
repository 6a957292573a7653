//! Domain types used throughout the scoring pipeline.
//!
//! This module defines:
//!
//! - the symbolic axes of both systems (`FiveElement`, `Sibsin`, `Planet`, `TransitCycle`, ...)
//! - the single input record (`MatrixCalculationInput`)
//! - the value objects produced by a calculation (`MatrixCell`, `DomainScore`, `FusionReport`, ...)

pub mod symbols;
pub mod types;

pub use symbols::*;
pub use types::*;

//! Layer lookup tables.
//!
//! - table shapes, lookup and invariant checks (`tables`)
//! - the built-in, rule-derived tables used when no table file is supplied (`builtin`)

pub mod builtin;
pub mod tables;

pub use tables::*;

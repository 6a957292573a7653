//! Input/output helpers.
//!
//! - input JSON ingest + validation (`input`)
//! - locating scorable input files (`discover`)
//! - layer table JSON read/write (`tables`)
//! - report exports (`export`)

pub mod discover;
pub mod export;
pub mod input;
pub mod tables;

pub use discover::*;
pub use export::*;
pub use input::*;
pub use tables::*;

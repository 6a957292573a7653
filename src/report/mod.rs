//! Downstream views of a fusion calculation: calendar signals, ranked insights
//! and formatted terminal output.

pub mod format;
pub mod insights;
pub mod signals;

pub use format::*;
pub use insights::*;
pub use signals::*;

//! Small numeric utilities: clamps and means, the timeline hash, month arithmetic.

pub mod calendar;
pub mod hash;
pub mod stats;

pub use calendar::*;
pub use hash::*;
pub use stats::*;

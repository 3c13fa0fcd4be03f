//! Line diffing
//!
//! - `myers`: Myers' shortest edit script
//! - `hunk`: grouping of edits into context hunks
//! - `unified`: `diff -u` style rendering

pub mod hunk;
pub mod myers;
pub mod unified;

//! Data structures and algorithms, free of I/O
//!
//! - `branch`: branch names and branch-layout targets
//! - `compare`: diffing one located block across file revisions
//! - `core`: shared utilities (pager wrapper)
//! - `diff`: Myers' line diff and unified rendering
//! - `locator`: token-based lookup of `def`/`class` blocks by dotted path

pub mod branch;
pub mod compare;
pub mod core;
pub mod diff;
pub mod locator;

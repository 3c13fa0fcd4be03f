//! User-facing commands
//!
//! - `branch_diff`: diff one code block of a working file against its branch copies

pub mod branch_diff;

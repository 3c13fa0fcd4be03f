pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

use clap::ValueEnum;

/// Version-control system serving the branch copies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VcsKind {
    Svn,
    Git,
}

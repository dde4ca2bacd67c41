//! Subcommand implementations

pub mod call;
pub mod deploy;
pub mod query;

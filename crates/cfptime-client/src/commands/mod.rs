//! Subcommand implementations.

pub mod config;
pub mod labels;
pub mod list;
pub mod watch;

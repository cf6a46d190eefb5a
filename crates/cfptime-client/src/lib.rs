//! CLI, source selection, board rendering, watch mode
//!
//! This crate provides the `cfptime` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod source;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};

//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cfptime - Security conference CFP deadlines at a glance
#[derive(Debug, Parser)]
#[command(name = "cfptime")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CFPTIME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Document to read: a site URL (fetches /README.md) or a local path
    #[arg(long, env = "CFPTIME_SOURCE")]
    pub source: Option<String>,

    // --- Output flags ---
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// List closed CFPs after the open ones
    #[arg(long)]
    pub show_expired: bool,

    /// Do not emit terminal hyperlinks
    #[arg(long)]
    pub no_hyperlinks: bool,

    /// Do not color rows by urgency
    #[arg(long)]
    pub no_color: bool,

    /// Maximum conference name length (truncated with ellipsis)
    #[arg(long)]
    pub max_name_length: Option<usize>,

    // --- Filter flags ---
    /// Only show conferences with this label (can be repeated)
    #[arg(long = "label", action = clap::ArgAction::Append)]
    pub labels: Vec<String>,

    /// Require every --label instead of any of them
    #[arg(long)]
    pub match_all_labels: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> cfptime_core::OutputFormat {
        if self.json {
            cfptime_core::OutputFormat::Json
        } else {
            cfptime_core::OutputFormat::Tty
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch once and print the board (default)
    List,

    /// Keep the board on screen, refreshing periodically
    Watch {
        /// Seconds between refreshes
        #[arg(long)]
        interval: Option<u64>,
    },

    /// List the labels used in the document
    Labels,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

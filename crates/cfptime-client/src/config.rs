//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/cfptime/config.toml` by default. Command-line flags override
//! file values through [`ClientConfig::apply_cli`].

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cfptime_core::{FormatOptions, LabelFilter};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Configuration for the cfptime client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Where the document comes from.
    pub source: SourceSettings,

    /// Display settings.
    pub display: FormatOptions,

    /// Label filter.
    pub filters: LabelFilter,

    /// Watch mode settings.
    pub refresh: RefreshSettings,
}

/// Source document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Site URL or local path.
    pub location: Option<String>,

    /// Path of the document on the site.
    pub readme_path: String,

    /// HTTP timeout in seconds.
    pub timeout: u64,
}

impl SourceSettings {
    /// The HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            location: None,
            readme_path: "/README.md".to_string(),
            timeout: 10,
        }
    }
}

/// Watch mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Seconds between refreshes.
    pub interval: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self { interval: 60 }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cfptime")
    }

    /// Overrides file values with the flags that were given.
    pub fn apply_cli(&mut self, cli: &Cli) {
        self.debug |= cli.debug;
        if let Some(ref location) = cli.source {
            self.source.location = Some(location.clone());
        }
        self.display.show_expired |= cli.show_expired;
        if cli.no_hyperlinks {
            self.display.hyperlinks = false;
        }
        if cli.no_color {
            self.display.color = false;
        }
        if cli.max_name_length.is_some() {
            self.display.max_name_length = cli.max_name_length;
        }
        if !cli.labels.is_empty() {
            self.filters.labels = cli.labels.clone();
        }
        self.filters.match_all |= cli.match_all_labels;
    }

    /// Drops escape sequences when stdout is not a terminal.
    pub fn adapt_to_terminal(&mut self) {
        if !std::io::stdout().is_terminal() {
            self.display.hyperlinks = false;
            self.display.color = false;
        }
    }

    /// The watch interval.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval)
    }

    /// Checks values that would only fail later at runtime.
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh.interval == 0 {
            return Err("[refresh] interval must be at least 1 second".to_string());
        }
        if self.source.timeout == 0 {
            return Err("[source] timeout must be at least 1 second".to_string());
        }
        if self.display.max_name_length == Some(0) {
            return Err("[display] max_name_length must be positive".to_string());
        }
        Ok(())
    }
}

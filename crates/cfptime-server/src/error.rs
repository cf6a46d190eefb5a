//! Server error types.

use cfptime_providers::SourceError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the refresh loop.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Fetching the document failed.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The scheduler loop is gone.
    #[error("Scheduler is not running")]
    SchedulerStopped,
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The message shown on the board for this error.
    pub fn board_message(&self) -> String {
        match self {
            Self::Source(err) => err.message().to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_show_bare_message() {
        let err = ServerError::from(SourceError::status(500).with_origin("http"));
        assert_eq!(err.board_message(), "Failed to fetch README");
        assert!(err.to_string().starts_with("Source error: [http]"));
    }

    #[test]
    fn config_error() {
        let err = ServerError::config("interval must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: interval must be positive"
        );
        assert_eq!(err.board_message(), err.to_string());
    }
}

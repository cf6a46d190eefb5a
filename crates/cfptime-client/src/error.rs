//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Fetching the document failed.
    Source(String),
    /// The refresh loop failed.
    Server(String),
    /// Rendering output failed.
    Output(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Source(msg) => write!(f, "source error: {}", msg),
            Self::Server(msg) => write!(f, "refresh error: {}", msg),
            Self::Output(msg) => write!(f, "output error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<cfptime_providers::SourceError> for ClientError {
    fn from(err: cfptime_providers::SourceError) -> Self {
        Self::Source(err.to_string())
    }
}

impl From<cfptime_server::ServerError> for ClientError {
    fn from(err: cfptime_server::ServerError) -> Self {
        match err {
            cfptime_server::ServerError::Source(source) => Self::from(source),
            cfptime_server::ServerError::Config { message } => Self::Config(message),
            other => Self::Server(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(format!("failed to serialize JSON: {}", err))
    }
}

//! Error types for document source operations.

use std::fmt;
use thiserror::Error;

/// The message reported for any non-success HTTP status.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch README";

/// The category of a source error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorCode {
    /// Connection failed, timed out, or the body could not be read.
    Network,
    /// The server answered with a non-success status.
    Status,
    /// The document does not exist (local file missing).
    NotFound,
    /// The document is not valid text.
    InvalidResponse,
    /// Missing or invalid source configuration.
    Configuration,
    /// Unexpected local failure.
    Internal,
}

impl SourceErrorCode {
    /// Returns true if the next refresh cycle may succeed without any change.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network | Self::Status)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::Status => "status_error",
            Self::NotFound => "not_found",
            Self::InvalidResponse => "invalid_response",
            Self::Configuration => "configuration_error",
            Self::Internal => "internal_error",
        }
    }
}

impl fmt::Display for SourceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while fetching the source document.
#[derive(Debug, Error)]
pub struct SourceError {
    code: SourceErrorCode,
    message: String,
    /// Name of the source that failed ("http", "file", ...).
    origin: Option<String>,
    /// HTTP status, for [`SourceErrorCode::Status`].
    http_status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    pub fn new(code: SourceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            origin: None,
            http_status: None,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::Network, message)
    }

    /// A non-success response. The message is always [`FETCH_FAILED_MESSAGE`].
    pub fn status(http_status: u16) -> Self {
        Self {
            http_status: Some(http_status),
            ..Self::new(SourceErrorCode::Status, FETCH_FAILED_MESSAGE)
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::NotFound, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::Configuration, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::Internal, message)
    }

    /// Sets the name of the failing source.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> SourceErrorCode {
        self.code
    }

    /// The bare message, as shown on the board.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn is_transient(&self) -> bool {
        self.code.is_transient()
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref origin) = self.origin {
            write!(f, "[{}] ", origin)?;
        }
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(status) = self.http_status {
            write!(f, " (HTTP {})", status)?;
        }
        Ok(())
    }
}

/// A specialized Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

//! HTTP document source.
//!
//! Fetches `{base}{readme_path}` with a plain GET. Every non-success status
//! maps to the same error, whatever the server says in the body.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Response};
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{SourceError, SourceResult};
use crate::source::{BoxFuture, DocumentSource, FetchOptions};

/// Configuration for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Site the document is served from.
    pub base_url: Url,
    /// Path joined onto `base_url`. An absolute path replaces the base path.
    pub readme_path: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl HttpConfig {
    pub const DEFAULT_README_PATH: &'static str = "/README.md";

    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Creates a configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url.as_ref())?,
            readme_path: Self::DEFAULT_README_PATH.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("cfptime/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn with_readme_path(mut self, path: impl Into<String>) -> Self {
        self.readme_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The full document URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `readme_path` cannot be joined onto the base.
    pub fn document_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join(&self.readme_path)
    }
}

/// Fetches the document over HTTP(S).
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Creates a source from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not resolve, or a
    /// network error if the HTTP client cannot be built.
    pub fn new(config: HttpConfig) -> SourceResult<Self> {
        let url = config.document_url().map_err(|e| {
            SourceError::configuration(format!("Invalid document URL: {}", e)).with_source(e)
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                SourceError::network(format!("Failed to create HTTP client: {}", e)).with_source(e)
            })?;

        debug!(url = %url, "Created HTTP source");
        Ok(Self { client, url })
    }

    /// The URL fetched on every cycle.
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch(&self, options: FetchOptions) -> SourceResult<String> {
        let mut request = self.client.get(self.url.clone());
        if options.no_cache {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        trace!(url = %self.url, no_cache = options.no_cache, "Sending request");
        let response = request.send().await.map_err(|e| {
            SourceError::network(format!("Request failed: {}", e))
                .with_origin(self.name())
                .with_source(e)
        })?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> SourceResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        if !status.is_success() {
            warn!(status = %status, url = %self.url, "Document fetch failed");
            return Err(SourceError::status(status.as_u16()).with_origin(self.name()));
        }

        response.text().await.map_err(|e| {
            SourceError::network(format!("Failed to read response: {}", e))
                .with_origin(self.name())
                .with_source(e)
        })
    }
}

impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_text(&self, options: FetchOptions) -> BoxFuture<'_, SourceResult<String>> {
        Box::pin(self.fetch(options))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

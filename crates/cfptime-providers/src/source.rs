//! The [`DocumentSource`] trait.
//!
//! A source produces the raw text of the document holding the CFP table.
//! It knows nothing about the table itself.

use std::future::Future;
use std::pin::Pin;

use crate::error::{SourceError, SourceResult};

/// A boxed future for async trait methods, keeping the trait object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Options for a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Ask intermediaries not to serve a cached copy.
    pub no_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { no_cache: true }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }
}

/// Something that can fetch the source document.
///
/// ```ignore
/// impl DocumentSource for MySource {
///     fn name(&self) -> &str { "mine" }
///
///     fn fetch_text(&self, _options: FetchOptions) -> BoxFuture<'_, SourceResult<String>> {
///         Box::pin(async move { Ok(String::from("| Conference | CFP Ends | ...")) })
///     }
/// }
/// ```
pub trait DocumentSource: Send + Sync {
    /// Short name used in logs and error messages ("http", "file").
    fn name(&self) -> &str;

    /// Fetches the whole document as text.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] on transport failure, a non-success response,
    /// or a missing document.
    fn fetch_text(&self, options: FetchOptions) -> BoxFuture<'_, SourceResult<String>>;

    /// Human-readable location, for `--debug` output.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_text(&self, options: FetchOptions) -> BoxFuture<'_, SourceResult<String>> {
        (**self).fetch_text(options)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A source serving fixed text.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DocumentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_text(&self, _options: FetchOptions) -> BoxFuture<'_, SourceResult<String>> {
        let text = self.text.clone();
        Box::pin(async move { Ok(text) })
    }
}

/// A source that always fails.
///
/// Useful in tests, or as a placeholder when a source cannot be built.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: SourceError,
}

impl ErrorSource {
    pub fn new(name: impl Into<String>, error: SourceError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }

    fn rebuild_error(&self) -> SourceError {
        let error = match self.error.http_status() {
            Some(status) => SourceError::status(status),
            None => SourceError::new(self.error.code(), self.error.message()),
        };
        error.with_origin(&self.name)
    }
}

impl DocumentSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_text(&self, _options: FetchOptions) -> BoxFuture<'_, SourceResult<String>> {
        let error = self.rebuild_error();
        Box::pin(async move { Err(error) })
    }
}

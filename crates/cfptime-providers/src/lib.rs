//! DocumentSource trait and implementations.
//!
//! A source fetches the raw text of the document that holds the CFP table:
//!
//! - [`DocumentSource`] - the trait every source implements
//! - [`HttpSource`] - GET over HTTP(S) (feature `http`, on by default)
//! - [`FileSource`] - a local file, re-read on every fetch
//! - [`StaticSource`] / [`ErrorSource`] - fixed text or a fixed failure
//! - [`SourceError`] - error taxonomy shared by all sources
//!
//! # Example
//!
//! ```ignore
//! use cfptime_providers::{DocumentSource, FetchOptions, HttpConfig, HttpSource};
//!
//! async fn readme() -> cfptime_providers::SourceResult<String> {
//!     let source = HttpSource::new(HttpConfig::new("https://example.org").unwrap())?;
//!     source.fetch_text(FetchOptions::default()).await
//! }
//! ```

pub mod error;
pub mod file;
#[cfg(feature = "http")]
pub mod http;
pub mod source;

pub use error::{FETCH_FAILED_MESSAGE, SourceError, SourceErrorCode, SourceResult};
pub use file::FileSource;
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpSource};
pub use source::{BoxFuture, DocumentSource, ErrorSource, FetchOptions, StaticSource};

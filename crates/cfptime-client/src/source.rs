//! Builds the document source from settings.
//!
//! `location` is read as:
//! - an `http://` or `https://` URL: the site serving the document. A URL
//!   that already points at a `.md` file is fetched as is, otherwise
//!   `readme_path` is joined onto it
//! - anything else: a local path, or a directory holding `README.md`

use std::path::PathBuf;

use cfptime_providers::{DocumentSource, FileSource};
use tracing::debug;

use crate::config::{ClientConfig, SourceSettings};
use crate::error::{ClientError, ClientResult};

/// Creates the source described by `settings`.
///
/// # Errors
///
/// Fails when no location is configured, or the URL is invalid.
pub fn build_source(settings: &SourceSettings) -> ClientResult<Box<dyn DocumentSource>> {
    let location = settings.location.as_deref().map(str::trim).unwrap_or("");
    if location.is_empty() {
        return Err(ClientError::Config(format!(
            "no source configured. Pass --source <URL|PATH> or add to {}:\n  \
             [source]\n  \
             location = \"https://example.org\"",
            ClientConfig::default_path().display()
        )));
    }

    if is_url(location) {
        return http_source(location, settings);
    }

    let mut path = PathBuf::from(location);
    if path.is_dir() {
        path.push("README.md");
    }
    debug!(path = %path.display(), "Using file source");
    Ok(Box::new(FileSource::new(path)))
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(feature = "http")]
fn http_source(
    location: &str,
    settings: &SourceSettings,
) -> ClientResult<Box<dyn DocumentSource>> {
    use cfptime_providers::{HttpConfig, HttpSource};

    let config = HttpConfig::new(location)
        .map_err(|e| ClientError::Config(format!("invalid source URL {}: {}", location, e)))?
        .with_timeout(settings.request_timeout());

    let readme_path = if config.base_url.path().ends_with(".md") {
        String::new()
    } else {
        settings.readme_path.clone()
    };

    let source = HttpSource::new(config.with_readme_path(readme_path))?;
    debug!(url = %source.url(), "Using HTTP source");
    Ok(Box::new(source))
}

#[cfg(not(feature = "http"))]
fn http_source(
    location: &str,
    _settings: &SourceSettings,
) -> ClientResult<Box<dyn DocumentSource>> {
    Err(ClientError::Config(format!(
        "{} is a URL but cfptime was built without the `http` feature",
        location
    )))
}

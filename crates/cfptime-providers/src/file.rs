//! Local file document source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{SourceError, SourceResult};
use crate::source::{BoxFuture, DocumentSource, FetchOptions};

/// Reads the document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> SourceResult<String> {
        trace!(path = %self.path.display(), "Reading document");
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            let message = format!("{}: {}", self.path.display(), e);
            let error = match e.kind() {
                ErrorKind::NotFound => SourceError::not_found(message),
                ErrorKind::InvalidData => SourceError::invalid_response(message),
                _ => SourceError::internal(message),
            };
            error.with_origin(self.name()).with_source(e)
        })
    }
}

impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    // Caching does not apply to local reads.
    fn fetch_text(&self, _options: FetchOptions) -> BoxFuture<'_, SourceResult<String>> {
        Box::pin(self.read())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

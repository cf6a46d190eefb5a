//! Lists the labels used in the document.

use cfptime_core::OutputFormat;
use cfptime_server::{new_snapshot_store, refresh_once};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::render::render_labels;
use crate::source::build_source;

pub async fn run(config: &ClientConfig, format: OutputFormat) -> ClientResult<()> {
    let output = fetch_labels(config, format).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Fetches the document and renders its labels in first-seen order.
///
/// # Errors
///
/// Fails when the config is invalid, the source cannot be built or the
/// fetch fails.
pub async fn fetch_labels(config: &ClientConfig, format: OutputFormat) -> ClientResult<String> {
    config.validate().map_err(ClientError::Config)?;
    let source = build_source(&config.source)?;
    let store = new_snapshot_store();
    refresh_once(&*source, &store).await?;

    let store = store.read().await;
    render_labels(&store, format)
}

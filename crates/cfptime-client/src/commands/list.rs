//! One-shot board: fetch, parse, print.

use cfptime_core::OutputFormat;
use cfptime_providers::DocumentSource;
use cfptime_server::{new_snapshot_store, refresh_once};
use chrono::Utc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::render::render_board;
use crate::source::build_source;

/// A rendered board and the outcome of the fetch behind it.
#[derive(Debug)]
pub struct FetchedBoard {
    /// The board text; `[ERROR] ...` when the fetch failed.
    pub text: String,
    /// Why the fetch failed, if it did.
    pub error: Option<ClientError>,
}

impl FetchedBoard {
    /// Turns a failed fetch back into an error.
    pub fn into_result(self) -> ClientResult<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.text),
        }
    }
}

/// Prints the board once. A failed fetch is printed as the board and then
/// returned, so the exit code is non-zero.
pub async fn run(config: &ClientConfig, format: OutputFormat) -> ClientResult<()> {
    let board = fetch_board(config, format).await?;
    println!("{}", board.text);
    board.into_result().map(|_| ())
}

/// Validates the config, builds the source and renders the board.
///
/// # Errors
///
/// Fails when the config is invalid or the source cannot be built. Fetch
/// failures are reported through [`FetchedBoard::error`].
pub async fn fetch_board(
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<FetchedBoard> {
    config.validate().map_err(ClientError::Config)?;
    let source = build_source(&config.source)?;
    fetch_board_from(&*source, config, format).await
}

/// Runs one refresh against `source` and renders whatever the store holds.
pub async fn fetch_board_from(
    source: &dyn DocumentSource,
    config: &ClientConfig,
    format: OutputFormat,
) -> ClientResult<FetchedBoard> {
    let store = new_snapshot_store();

    let error = match refresh_once(source, &store).await {
        Ok(outcome) => {
            debug!(rows = outcome.rows, "Board fetched");
            None
        }
        Err(err) => Some(ClientError::from(err)),
    };

    let store = store.read().await;
    let text = render_board(&store, config, format, Utc::now())?;
    Ok(FetchedBoard { text, error })
}

//! One fetch-parse cycle.

use cfptime_core::parse_document;
use cfptime_providers::{DocumentSource, FetchOptions};
use tracing::{debug, instrument};

use crate::error::ServerResult;
use crate::store::{Completion, RequestTicket, SharedSnapshotStore};

/// What a successful cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub ticket: RequestTicket,
    pub completion: Completion,
    /// Rows parsed from the document.
    pub rows: usize,
}

/// Fetches the document, parses it and installs the result.
///
/// The store lock is not held while fetching. A failed fetch is installed
/// as [`CurrentState::Failed`](crate::CurrentState::Failed) and also
/// returned as an error.
///
/// # Errors
///
/// Returns [`ServerError::Source`](crate::ServerError::Source) when the fetch fails.
#[instrument(skip_all, fields(source = source.name()))]
pub async fn refresh_once<S>(source: &S, store: &SharedSnapshotStore) -> ServerResult<RefreshOutcome>
where
    S: DocumentSource + ?Sized,
{
    let ticket = store.write().await.begin();
    debug!(sequence = ticket.sequence(), "Fetching document");

    match source.fetch_text(FetchOptions::default()).await {
        Ok(text) => {
            let records = parse_document(&text);
            let rows = records.len();
            let completion = store.write().await.complete(ticket, Ok(records));
            Ok(RefreshOutcome {
                ticket,
                completion,
                rows,
            })
        }
        Err(err) => {
            store
                .write()
                .await
                .complete(ticket, Err(err.message().to_string()));
            Err(err.into())
        }
    }
}

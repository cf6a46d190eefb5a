//! Latest board state with request sequencing.
//!
//! Every refresh cycle takes a [`RequestTicket`] before fetching. Tickets are
//! numbered in issue order, and a completion is installed only if its ticket
//! is newer than the one behind the current state. A slow fetch that finishes
//! after a newer one is discarded instead of overwriting fresher data.

use std::sync::Arc;

use cfptime_core::ConferenceRecord;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, trace, warn};

/// A successfully parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Records in deadline order.
    pub records: Vec<ConferenceRecord>,
    /// When the fetch behind this snapshot completed.
    pub last_sync: DateTime<Utc>,
    /// Sequence of the request that produced it.
    pub sequence: u64,
}

/// What the board currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CurrentState {
    /// No cycle has completed yet.
    #[default]
    Loading,
    /// The latest cycle succeeded.
    Ready(Snapshot),
    /// The latest cycle failed. Earlier records are not kept.
    Failed { message: String },
}

/// Proof that a request was started, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket {
    sequence: u64,
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Outcome of [`SnapshotStore::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result replaced the current state.
    Installed,
    /// A newer request already completed; the result was dropped.
    Stale,
}

/// Holds the current state and sequences concurrent refreshes.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    state: CurrentState,
    /// Last sequence handed out.
    issued: u64,
    /// Sequence of the request behind `state`, 0 before any completion.
    installed: u64,
    /// Last successful sync, kept across failures.
    last_sync: Option<DateTime<Utc>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request and returns its ticket.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        trace!(sequence = self.issued, "Request started");
        RequestTicket {
            sequence: self.issued,
        }
    }

    /// Completes a request, stamping success with the current time.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<ConferenceRecord>, String>,
    ) -> Completion {
        self.complete_at(ticket, result, Utc::now())
    }

    /// Completes a request at a given time.
    pub fn complete_at(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<ConferenceRecord>, String>,
        now: DateTime<Utc>,
    ) -> Completion {
        if ticket.sequence <= self.installed {
            debug!(
                sequence = ticket.sequence,
                installed = self.installed,
                "Discarding stale completion"
            );
            return Completion::Stale;
        }

        self.installed = ticket.sequence;
        self.state = match result {
            Ok(records) => {
                debug!(sequence = ticket.sequence, rows = records.len(), "Installed snapshot");
                self.last_sync = Some(now);
                CurrentState::Ready(Snapshot {
                    records,
                    last_sync: now,
                    sequence: ticket.sequence,
                })
            }
            Err(message) => {
                warn!(sequence = ticket.sequence, error = %message, "Refresh failed");
                CurrentState::Failed { message }
            }
        };
        Completion::Installed
    }

    pub fn state(&self) -> &CurrentState {
        &self.state
    }

    /// Records of the current snapshot; empty while loading or failed.
    pub fn records(&self) -> &[ConferenceRecord] {
        match &self.state {
            CurrentState::Ready(snapshot) => &snapshot.records,
            _ => &[],
        }
    }

    /// Time of the last successful sync, even if a later cycle failed.
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CurrentState::Loading)
    }

    /// The failure message, if the latest cycle failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CurrentState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Number of requests started so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// Store shared between the refresh loop and readers.
pub type SharedSnapshotStore = Arc<RwLock<SnapshotStore>>;

/// Creates a new shared store in the loading state.
pub fn new_snapshot_store() -> SharedSnapshotStore {
    Arc::new(RwLock::new(SnapshotStore::new()))
}

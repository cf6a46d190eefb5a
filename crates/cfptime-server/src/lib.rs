//! Refresh loop for the CFP board.
//!
//! This crate keeps the board current:
//! - [`Scheduler`] runs a cycle at startup and then on a fixed interval,
//!   with manual refresh, pause and resume
//! - [`SnapshotStore`] holds the latest state and drops results of requests
//!   that were overtaken by newer ones
//! - [`refresh_once`] is one fetch, parse and install cycle
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use cfptime_providers::StaticSource;
//! use cfptime_server::{Scheduler, SchedulerConfig, new_snapshot_store, refresh_once};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = Arc::new(StaticSource::new("| Conference | CFP Ends |"));
//!     let store = new_snapshot_store();
//!     let scheduler = Scheduler::new(SchedulerConfig::default());
//!
//!     let cycle_store = store.clone();
//!     scheduler
//!         .run(move || {
//!             let source = source.clone();
//!             let store = cycle_store.clone();
//!             async move {
//!                 refresh_once(source.as_ref(), &store)
//!                     .await
//!                     .map(|_| ())
//!                     .map_err(|e| e.board_message())
//!             }
//!         })
//!         .await;
//! }
//! ```

mod error;
mod refresh;
mod scheduler;
mod store;

pub use error::{ServerError, ServerResult};
pub use refresh::{RefreshOutcome, refresh_once};
pub use scheduler::{
    Scheduler, SchedulerCommand, SchedulerConfig, SchedulerHandle, SchedulerState,
    SharedSchedulerState, new_scheduler_state,
};
pub use store::{
    Completion, CurrentState, RequestTicket, SharedSnapshotStore, Snapshot, SnapshotStore,
    new_snapshot_store,
};

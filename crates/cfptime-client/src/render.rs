//! Board rendering for the current store state.

use cfptime_core::format::{format_error, format_loading};
use cfptime_core::{ConferenceRecord, OutputFormat, OutputFormatter, partition};
use cfptime_server::{CurrentState, SnapshotStore};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Renders the whole board: status line plus table, or the error.
pub fn render_board(
    store: &SnapshotStore,
    config: &ClientConfig,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> ClientResult<String> {
    let formatter = OutputFormatter::new(config.display.clone());
    let last_sync = store.last_sync();

    match (store.state(), format) {
        (CurrentState::Loading, OutputFormat::Tty) => Ok(format_loading().to_string()),
        (CurrentState::Loading, OutputFormat::Json) => {
            Ok(serde_json::to_string(&json!({ "loading": true }))?)
        }
        (CurrentState::Failed { message }, OutputFormat::Tty) => Ok(format_error(message)),
        (CurrentState::Failed { message }, OutputFormat::Json) => {
            let last_sync = last_sync.map(|at| at.to_rfc3339());
            Ok(serde_json::to_string(
                &json!({ "error": message, "last_sync": last_sync }),
            )?)
        }
        (CurrentState::Ready(snapshot), OutputFormat::Tty) => {
            let kept = filtered(&snapshot.records, config);
            let split = partition(&kept, now);
            let summary =
                formatter.format_summary(split.active_count(), split.expired_count(), last_sync);
            let table = formatter.render_table_at(&kept, now);
            Ok(format!("{}\n\n{}", summary, table))
        }
        (CurrentState::Ready(snapshot), OutputFormat::Json) => {
            let kept = filtered(&snapshot.records, config);
            let output = formatter.format_json_at(&kept, now, last_sync);
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

/// Labels used across the current records, one per line or as a JSON array.
pub fn render_labels(store: &SnapshotStore, format: OutputFormat) -> ClientResult<String> {
    let labels = cfptime_core::collect_labels(store.records());
    match format {
        OutputFormat::Tty => Ok(labels.join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&labels)?),
    }
}

fn filtered(records: &[ConferenceRecord], config: &ClientConfig) -> Vec<ConferenceRecord> {
    config
        .filters
        .apply(records)
        .into_iter()
        .cloned()
        .collect()
}

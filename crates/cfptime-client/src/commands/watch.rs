//! Watch mode: keeps the board on screen and refreshes it periodically.

use std::sync::Arc;
use std::time::Duration;

use cfptime_core::OutputFormat;
use cfptime_providers::DocumentSource;
use cfptime_server::{
    Scheduler, SchedulerConfig, SharedSnapshotStore, new_snapshot_store, refresh_once,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::render::render_board;
use crate::source::build_source;

/// Clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Runs until Ctrl-C, refreshing every `[refresh] interval`.
pub async fn run(config: &ClientConfig, format: OutputFormat) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;
    let interval = config.refresh_interval();
    let source: Arc<dyn DocumentSource> = Arc::from(build_source(&config.source)?);
    let store = new_snapshot_store();
    let scheduler = Scheduler::new(SchedulerConfig::new(interval)?);
    let handle = scheduler.handle();

    info!(
        source = %source.describe(),
        interval_secs = interval.as_secs(),
        "Watching CFP board"
    );

    let config = Arc::new(config.clone());
    let task = tokio::spawn(async move {
        scheduler
            .run(move || {
                let source = source.clone();
                let store = store.clone();
                let config = config.clone();
                async move { cycle(source.as_ref(), &store, &config, format).await }
            })
            .await;
    });

    tokio::signal::ctrl_c().await?;
    info!("Interrupted, stopping");
    if let Err(e) = handle.stop().await {
        warn!(error = %e, "Failed to send stop command to scheduler");
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), task).await;
    Ok(())
}

/// Refreshes the store and redraws the board, failed or not.
async fn cycle(
    source: &dyn DocumentSource,
    store: &SharedSnapshotStore,
    config: &ClientConfig,
    format: OutputFormat,
) -> Result<(), String> {
    let result = refresh_once(source, store).await;

    let board = {
        let store = store.read().await;
        render_board(&store, config, format, Utc::now()).map_err(|e| e.to_string())?
    };
    match format {
        OutputFormat::Tty => println!("{}{}", CLEAR_SCREEN, board),
        OutputFormat::Json => println!("{}", compact(&board)),
    }

    result.map(|_| ()).map_err(|e| e.board_message())
}

/// One JSON document per line.
fn compact(board: &str) -> String {
    serde_json::from_str::<serde_json::Value>(board)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| board.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfptime_core::FormatOptions;
    use cfptime_providers::{ErrorSource, SourceError, StaticSource};
    use cfptime_server::CurrentState;

    fn config() -> ClientConfig {
        ClientConfig {
            display: FormatOptions::plain(),
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn zero_interval_is_rejected_before_starting() {
        let mut config = config();
        config.source.location = Some("README.md".to_string());
        config.refresh.interval = 0;

        let err = run(&config, OutputFormat::Tty).await.unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains("interval"));
    }

    #[test]
    fn compact_json_is_single_line() {
        assert_eq!(compact("{\n  \"a\": 1\n}"), "{\"a\":1}");
        assert_eq!(compact("not json"), "not json");
    }

    #[tokio::test]
    async fn cycle_installs_records() {
        let source = StaticSource::new(
            "| Conference | CFP Ends | Conference Date | Location | CFP Link |\n\
             |---|---|---|---|---|\n\
             | Some Con | TBD | 2026 | Remote | [Submit](https://cfp.example) |\n",
        );
        let store = new_snapshot_store();

        cycle(&source, &store, &config(), OutputFormat::Json)
            .await
            .unwrap();
        assert_eq!(store.read().await.records().len(), 1);
    }

    #[tokio::test]
    async fn failed_cycle_reports_board_message() {
        let source = ErrorSource::new("failing", SourceError::status(503));
        let store = new_snapshot_store();

        let err = cycle(&source, &store, &config(), OutputFormat::Tty)
            .await
            .unwrap_err();
        assert_eq!(err, "Failed to fetch README");
        assert!(matches!(
            store.read().await.state(),
            CurrentState::Failed { .. }
        ));
    }
}

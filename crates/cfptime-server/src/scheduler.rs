//! Periodic refresh scheduler.
//!
//! Runs one cycle as soon as it starts, then one per interval. There is no
//! jitter and no backoff: a failed cycle is simply retried on the next tick.
//! A manual refresh runs immediately and restarts the interval.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, mpsc};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{ServerError, ServerResult};

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between the start of two cycles.
    pub refresh_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl SchedulerConfig {
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

    /// Creates a config with the given interval.
    ///
    /// # Errors
    ///
    /// A zero interval is rejected.
    pub fn new(refresh_interval: Duration) -> ServerResult<Self> {
        if refresh_interval.is_zero() {
            return Err(ServerError::config("refresh interval must be positive"));
        }
        Ok(Self { refresh_interval })
    }
}

/// Commands that can be sent to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Run a cycle now, even while paused.
    RefreshNow,
    /// Skip timed cycles until resumed.
    Pause,
    Resume,
    Stop,
}

/// Scheduler state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerState {
    pub paused: bool,
    /// Cycles run so far, successful or not.
    pub cycles: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    /// Error of the latest cycle, cleared on success.
    pub last_error: Option<String>,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful cycle.
    pub fn record_success(&mut self) {
        let now = Utc::now();
        self.cycles += 1;
        self.last_success = Some(now);
        self.last_attempt = Some(now);
        self.last_error = None;
    }

    /// Records a failed cycle.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.cycles += 1;
        self.last_attempt = Some(Utc::now());
        self.last_error = Some(error.into());
    }
}

/// Shared scheduler state.
pub type SharedSchedulerState = Arc<RwLock<SchedulerState>>;

/// Creates a new shared scheduler state.
pub fn new_scheduler_state() -> SharedSchedulerState {
    Arc::new(RwLock::new(SchedulerState::new()))
}

/// Drives refresh cycles on a fixed interval.
pub struct Scheduler {
    config: SchedulerConfig,
    state: SharedSchedulerState,
    command_tx: mpsc::Sender<SchedulerCommand>,
    command_rx: mpsc::Receiver<SchedulerCommand>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(16);
        Self {
            config,
            state: new_scheduler_state(),
            command_tx,
            command_rx,
        }
    }

    /// Returns a handle for sending commands to the scheduler.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            command_tx: self.command_tx.clone(),
            state: self.state.clone(),
        }
    }

    pub fn state(&self) -> SharedSchedulerState {
        self.state.clone()
    }

    /// Runs the loop until stopped or every handle is dropped.
    ///
    /// `cycle_fn` returns `Err(message)` when the cycle failed; the loop
    /// keeps going either way.
    pub async fn run<F, Fut>(self, cycle_fn: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send,
    {
        let Scheduler {
            config,
            state,
            command_tx,
            mut command_rx,
        } = self;
        // Only handles keep the channel open.
        drop(command_tx);

        info!(
            interval_secs = config.refresh_interval.as_secs(),
            "Scheduler started"
        );

        // `interval` panics on a zero period.
        let period = config.refresh_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if state.read().await.paused {
                        debug!("Scheduler paused, skipping cycle");
                        continue;
                    }
                    run_cycle(&state, &cycle_fn).await;
                }
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(SchedulerCommand::RefreshNow) => {
                            debug!("Received RefreshNow command");
                            run_cycle(&state, &cycle_fn).await;
                            ticker.reset();
                        }
                        Some(SchedulerCommand::Pause) => {
                            info!("Scheduler paused");
                            state.write().await.paused = true;
                        }
                        Some(SchedulerCommand::Resume) => {
                            info!("Scheduler resumed");
                            state.write().await.paused = false;
                        }
                        Some(SchedulerCommand::Stop) | None => {
                            info!("Scheduler stopping");
                            break;
                        }
                    }
                }
            }
        }
    }
}

async fn run_cycle<F, Fut>(state: &SharedSchedulerState, cycle_fn: &F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    debug!("Starting refresh cycle");
    match cycle_fn().await {
        Ok(()) => {
            debug!("Refresh cycle completed");
            state.write().await.record_success();
        }
        Err(e) => {
            warn!(error = %e, "Refresh cycle failed");
            state.write().await.record_failure(e);
        }
    }
}

/// Handle for sending commands to a running scheduler.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    command_tx: mpsc::Sender<SchedulerCommand>,
    state: SharedSchedulerState,
}

impl SchedulerHandle {
    async fn send(&self, command: SchedulerCommand) -> ServerResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| ServerError::SchedulerStopped)
    }

    /// Triggers an immediate cycle.
    pub async fn refresh_now(&self) -> ServerResult<()> {
        self.send(SchedulerCommand::RefreshNow).await
    }

    pub async fn pause(&self) -> ServerResult<()> {
        self.send(SchedulerCommand::Pause).await
    }

    pub async fn resume(&self) -> ServerResult<()> {
        self.send(SchedulerCommand::Resume).await
    }

    pub async fn stop(&self) -> ServerResult<()> {
        self.send(SchedulerCommand::Stop).await
    }

    /// Returns a copy of the current scheduler state.
    pub async fn state(&self) -> SchedulerState {
        self.state.read().await.clone()
    }

    pub async fn is_paused(&self) -> bool {
        self.state.read().await.paused
    }
}

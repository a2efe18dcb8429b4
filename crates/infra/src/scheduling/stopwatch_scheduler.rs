//! Stopwatch scheduler driving ticks and snapshot flushes
//!
//! The service itself only advances when someone asks it for a status, so a
//! session left running with no command polling would cross the 24h ceiling
//! unnoticed and would lose everything since the last transition on a crash.
//! This scheduler closes both gaps: a fast tick re-evaluates the session so
//! the cap lands close to real time, and a slower flush persists the running
//! baseline so a crash loses at most one flush interval of progress.

use std::sync::Arc;
use std::time::Duration;

use fieldlog_core::stopwatch::StopwatchService;
use fieldlog_domain::constants::{TIMER_FLUSH_INTERVAL_MS, TIMER_TICK_INTERVAL_MS};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Configuration for the stopwatch scheduler
#[derive(Debug, Clone)]
pub struct StopwatchSchedulerConfig {
    /// How often the session is re-evaluated against the ceiling
    pub tick_interval: Duration,
    /// How often the running session is flushed to the snapshot store
    pub flush_interval: Duration,
}

impl Default for StopwatchSchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TIMER_TICK_INTERVAL_MS),
            flush_interval: Duration::from_millis(TIMER_FLUSH_INTERVAL_MS),
        }
    }
}

impl StopwatchSchedulerConfig {
    /// Build a config from the millisecond values carried by the app config
    pub fn from_millis(tick_ms: u64, flush_ms: u64) -> Self {
        Self {
            tick_interval: Duration::from_millis(tick_ms),
            flush_interval: Duration::from_millis(flush_ms),
        }
    }
}

/// Background driver for a shared stopwatch service
pub struct StopwatchScheduler {
    service: Arc<StopwatchService>,
    config: StopwatchSchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl StopwatchScheduler {
    /// Create a new scheduler over the shared service
    pub fn new(service: Arc<StopwatchService>, config: StopwatchSchedulerConfig) -> Self {
        Self {
            service,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the scheduler
    ///
    /// Spawns a background task that ticks and flushes periodically.
    ///
    /// # Errors
    ///
    /// Returns error if scheduler is already running
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        info!(
            tick_ms = self.config.tick_interval.as_millis() as u64,
            flush_ms = self.config.flush_interval.as_millis() as u64,
            "Starting stopwatch scheduler"
        );

        // Create a new cancellation token (supports restart after stop)
        self.cancellation_token = CancellationToken::new();

        let service = Arc::clone(&self.service);
        let config = self.config.clone();
        let cancel = self.cancellation_token.clone();

        let handle = tokio::spawn(async move {
            Self::run_loop(service, config, cancel).await;
        });

        *self.task_handle.lock().await = Some(handle);

        Ok(())
    }

    /// Stop the scheduler gracefully
    ///
    /// Cancels the background task and awaits completion; the loop persists
    /// one last time on its way out.
    ///
    /// # Errors
    ///
    /// Returns error if scheduler is not running
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        info!("Stopping stopwatch scheduler");

        self.cancellation_token.cancel();

        if let Some(handle) = self.task_handle.lock().await.take() {
            let join_timeout = Duration::from_secs(5);
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|_| SchedulerError::ShutdownTimeout(join_timeout))??;
        }

        info!("Stopwatch scheduler stopped");

        Ok(())
    }

    /// Check if scheduler is running
    ///
    /// A scheduler is considered running if it has an active task handle that
    /// hasn't finished.
    pub fn is_running(&self) -> bool {
        self.task_handle
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Background tick/flush loop
    async fn run_loop(
        service: Arc<StopwatchService>,
        config: StopwatchSchedulerConfig,
        cancel: CancellationToken,
    ) {
        let mut tick = tokio::time::interval(config.tick_interval);
        let mut flush = tokio::time::interval(config.flush_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        flush.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Stopwatch loop cancelled, flushing final state");
                    service.persist();
                    break;
                }
                _ = tick.tick() => {
                    let status = service.status();
                    if status.capped_now {
                        info!(
                            elapsed_ms = status.elapsed_ms,
                            "Session reached the daily ceiling and was paused"
                        );
                    }
                }
                _ = flush.tick() => {
                    service.persist();
                }
            }
        }
    }
}

/// Ensure scheduler is stopped when dropped
impl Drop for StopwatchScheduler {
    fn drop(&mut self) {
        // Note: Can't check task_handle (async), so check if token is not cancelled
        // This is best-effort cleanup in Drop
        if !self.cancellation_token.is_cancelled() {
            warn!("StopwatchScheduler dropped while running; cancelling");
            self.cancellation_token.cancel();
        }
    }
}

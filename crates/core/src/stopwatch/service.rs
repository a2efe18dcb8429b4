//! Stopwatch service - session lifecycle over the engine and snapshot store
//!
//! Thin synchronous wrapper: the engine is pure and takes `now_ms`
//! explicitly, the service reads the wall clock, serializes access behind a
//! mutex, and keeps the persisted snapshot in step with every transition.
//! Snapshot write failures are logged and swallowed; a broken disk must
//! never take the running session down with it.

use std::sync::Arc;

use fieldlog_common::time::{ms_to_decimal_hours, now_ms, today_iso};
use fieldlog_domain::{FieldLogError, Result};
use parking_lot::Mutex;
use tracing::warn;

use super::engine::{StopwatchEngine, StopwatchState, TickOutcome};
use super::ports::SnapshotStore;

/// Snapshot of the session as seen by the surface at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopwatchStatus {
    pub state: StopwatchState,
    /// Shown elapsed time, clamped to the ceiling.
    pub elapsed_ms: u64,
    pub running: bool,
    /// Raised exactly once, on the evaluation that hit the ceiling.
    pub capped_now: bool,
}

/// A stopped session handed off to note creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedSession {
    /// Decimal hours of the session, rounded to 2 decimals.
    pub hours: f64,
    /// Local calendar date the session ended on (`yyyy-mm-dd`).
    pub date_iso: String,
}

/// Stopwatch session service.
pub struct StopwatchService {
    engine: Mutex<StopwatchEngine>,
    store: Arc<dyn SnapshotStore>,
}

impl StopwatchService {
    /// Create a service with an idle engine. Call [`Self::hydrate`] to pick
    /// up a persisted session.
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { engine: Mutex::new(StopwatchEngine::new()), store }
    }

    /// Restore the session from the persisted snapshot.
    ///
    /// A missing or corrupt snapshot starts idle. A snapshot that was
    /// running is caught up with the wall time spent away and resumes (or
    /// lands capped, raising the one-time notice). The reconciled state is
    /// persisted back immediately.
    pub fn hydrate(&self) -> StopwatchStatus {
        let now = now_ms();
        let snapshot = self.store.load().unwrap_or_default();

        let mut engine = self.engine.lock();
        let outcome = engine.reconcile(&snapshot, now);
        self.save_snapshot(&engine, now);

        Self::status_from(&engine, outcome)
    }

    /// Evaluate the session at the current instant.
    ///
    /// This is the periodic tick: below the ceiling it is a pure read, and
    /// the evaluation that crosses the ceiling stops the session, persists,
    /// and raises `capped_now` once.
    pub fn status(&self) -> StopwatchStatus {
        let now = now_ms();
        let mut engine = self.engine.lock();
        let outcome = engine.tick(now);

        if outcome.capped_now {
            self.save_snapshot(&engine, now);
        }

        Self::status_from(&engine, outcome)
    }

    /// Start (or resume) the session.
    pub fn start(&self) -> Result<StopwatchStatus> {
        let now = now_ms();
        let mut engine = self.engine.lock();
        engine.start(now)?;
        self.save_snapshot(&engine, now);

        let outcome = engine.tick(now);
        Ok(Self::status_from(&engine, outcome))
    }

    /// Pause the session, folding the live segment into the baseline.
    pub fn pause(&self) -> StopwatchStatus {
        let now = now_ms();
        let mut engine = self.engine.lock();
        let outcome = engine.pause(now);
        self.save_snapshot(&engine, now);

        Self::status_from(&engine, outcome)
    }

    /// Play/pause button behavior: pause while running, start otherwise.
    ///
    /// Starting a capped session is rejected the same way [`Self::start`]
    /// rejects it.
    pub fn toggle(&self) -> Result<StopwatchStatus> {
        let running = self.engine.lock().is_running();
        if running {
            Ok(self.pause())
        } else {
            self.start()
        }
    }

    /// Zero the session and persist the idle state.
    pub fn reset(&self) -> StopwatchStatus {
        let now = now_ms();
        let mut engine = self.engine.lock();
        engine.reset();
        self.save_snapshot(&engine, now);

        let outcome = engine.tick(now);
        Self::status_from(&engine, outcome)
    }

    /// Flush the current state to the snapshot store.
    ///
    /// While running, the persisted baseline is advanced to the shown time
    /// with a fresh start stamp, so a later hydrate only adds the wall time
    /// since this flush.
    pub fn persist(&self) {
        let now = now_ms();
        let engine = self.engine.lock();
        self.save_snapshot(&engine, now);
    }

    /// Stop and throw the session away.
    pub fn stop_discard(&self) {
        self.engine.lock().reset();
        self.clear_snapshot();
    }

    /// Stop and hand the session off for note creation.
    ///
    /// Rejected when nothing has accrued; an empty session has nothing to
    /// save. On success the engine is reset and the snapshot cleared.
    pub fn stop_commit(&self) -> Result<CommittedSession> {
        let now = now_ms();
        let mut engine = self.engine.lock();

        let shown = engine.shown_elapsed(now);
        if shown == 0 {
            return Err(FieldLogError::InvalidInput("no elapsed time to save".into()));
        }

        engine.reset();
        drop(engine);
        self.clear_snapshot();

        Ok(CommittedSession { hours: ms_to_decimal_hours(shown), date_iso: today_iso() })
    }

    fn status_from(engine: &StopwatchEngine, outcome: TickOutcome) -> StopwatchStatus {
        StopwatchStatus {
            state: engine.state(),
            elapsed_ms: outcome.elapsed_ms,
            running: outcome.running,
            capped_now: outcome.capped_now,
        }
    }

    fn save_snapshot(&self, engine: &StopwatchEngine, now: i64) {
        let snapshot = engine.snapshot_at(now);
        if let Err(err) = self.store.save(&snapshot) {
            warn!(error = %err, "Failed to persist stopwatch snapshot");
        }
    }

    fn clear_snapshot(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear stopwatch snapshot");
        }
    }
}

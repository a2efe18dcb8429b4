//! Stopwatch state machine - core session accounting
//!
//! The engine owns no clock: every transition takes `now_ms` explicitly, so
//! the same code path serves live ticking, snapshot reconciliation after a
//! process restart, and deterministic tests.

use fieldlog_domain::constants::TIMER_CEILING_MS;
use fieldlog_domain::types::TimerSnapshot;
use fieldlog_domain::{FieldLogError, Result};

/// Discrete stopwatch states derived from the authoritative fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    /// Not running, nothing accumulated.
    Idle,
    /// A live segment is accruing on top of the accumulated baseline.
    Running,
    /// Stopped with time accumulated, below the ceiling.
    Paused,
    /// Accumulated time hit the 24-hour ceiling; a reset is required.
    Capped,
}

impl std::fmt::Display for StopwatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Capped => "capped",
        };
        write!(f, "{label}")
    }
}

/// Result of evaluating the stopwatch at a point in time.
///
/// `capped_now` is raised exactly once, on the evaluation that crosses the
/// ceiling. Later evaluations of an already-capped engine report `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Elapsed time shown to the user, clamped to the ceiling.
    pub elapsed_ms: u64,
    /// Whether the engine is still running after this evaluation.
    pub running: bool,
    /// True only on the transition into [`StopwatchState::Capped`].
    pub capped_now: bool,
}

/// Elapsed-duration session engine with a 24-hour ceiling.
///
/// `elapsed_ms` is the baseline accumulated across pauses; while running,
/// the live segment `now - started_at` is added on top at read time. The
/// invariant `elapsed_ms < TIMER_CEILING_MS` holds whenever `running` is
/// true; crossing the ceiling folds, clamps and stops in one step.
#[derive(Debug, Clone)]
pub struct StopwatchEngine {
    elapsed_ms: u64,
    running: bool,
    started_at: Option<i64>,
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchEngine {
    /// Create an idle engine with nothing accumulated.
    pub fn new() -> Self {
        Self { elapsed_ms: 0, running: false, started_at: None }
    }

    /// Current state, derived from the authoritative fields.
    pub fn state(&self) -> StopwatchState {
        if self.running {
            StopwatchState::Running
        } else if self.elapsed_ms >= TIMER_CEILING_MS {
            StopwatchState::Capped
        } else if self.elapsed_ms > 0 {
            StopwatchState::Paused
        } else {
            StopwatchState::Idle
        }
    }

    /// Whether a live segment is currently accruing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time to display at `now_ms`, without mutating the engine.
    ///
    /// While running this is the baseline plus the live segment, clamped to
    /// the ceiling. A clock that moved backwards contributes zero rather
    /// than a negative segment.
    pub fn shown_elapsed(&self, now_ms: i64) -> u64 {
        let live = match (self.running, self.started_at) {
            (true, Some(started_at)) => (now_ms - started_at).max(0) as u64,
            _ => 0,
        };
        self.elapsed_ms.saturating_add(live).min(TIMER_CEILING_MS)
    }

    /// Begin (or resume) a running segment at `now_ms`.
    ///
    /// Rejected when already running or when the ceiling has been reached;
    /// a capped session must be reset before it can run again.
    pub fn start(&mut self, now_ms: i64) -> Result<()> {
        if self.running {
            return Err(FieldLogError::InvalidInput("stopwatch is already running".into()));
        }
        if self.elapsed_ms >= TIMER_CEILING_MS {
            return Err(FieldLogError::InvalidInput(
                "stopwatch reached the 24-hour limit; reset before starting again".into(),
            ));
        }

        self.running = true;
        self.started_at = Some(now_ms);
        Ok(())
    }

    /// Fold the live segment into the baseline and stop at `now_ms`.
    ///
    /// Returns a no-op outcome when not running. Folding onto the ceiling
    /// lands in [`StopwatchState::Capped`] and raises `capped_now`.
    pub fn pause(&mut self, now_ms: i64) -> TickOutcome {
        if !self.running {
            return TickOutcome { elapsed_ms: self.elapsed_ms, running: false, capped_now: false };
        }

        let folded = self.shown_elapsed(now_ms);
        self.elapsed_ms = folded;
        self.running = false;
        self.started_at = None;

        TickOutcome { elapsed_ms: folded, running: false, capped_now: folded >= TIMER_CEILING_MS }
    }

    /// Evaluate the stopwatch at `now_ms`.
    ///
    /// While running below the ceiling this is pure. The evaluation that
    /// reaches the ceiling folds, clamps to exactly the ceiling, stops, and
    /// reports `capped_now` for that crossing only.
    pub fn tick(&mut self, now_ms: i64) -> TickOutcome {
        if !self.running {
            return TickOutcome { elapsed_ms: self.elapsed_ms, running: false, capped_now: false };
        }

        let shown = self.shown_elapsed(now_ms);
        if shown >= TIMER_CEILING_MS {
            self.elapsed_ms = TIMER_CEILING_MS;
            self.running = false;
            self.started_at = None;
            return TickOutcome { elapsed_ms: TIMER_CEILING_MS, running: false, capped_now: true };
        }

        TickOutcome { elapsed_ms: shown, running: true, capped_now: false }
    }

    /// Discard everything and return to [`StopwatchState::Idle`].
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.running = false;
        self.started_at = None;
    }

    /// Rebuild the engine from a persisted snapshot at `now_ms`.
    ///
    /// A snapshot that was running accounts for the wall time spent dead:
    /// `now - started_at` is added to the baseline and the session resumes
    /// with a fresh start stamp, unless the catch-up reaches the ceiling,
    /// in which case the engine lands capped and the outcome raises
    /// `capped_now` once. Non-running snapshots load verbatim (clamped).
    pub fn reconcile(&mut self, snapshot: &TimerSnapshot, now_ms: i64) -> TickOutcome {
        match (snapshot.running, snapshot.started_at) {
            (true, Some(started_at)) => {
                let away = (now_ms - started_at).max(0) as u64;
                let caught_up = snapshot.elapsed_ms.saturating_add(away);

                if caught_up >= TIMER_CEILING_MS {
                    self.elapsed_ms = TIMER_CEILING_MS;
                    self.running = false;
                    self.started_at = None;
                    TickOutcome {
                        elapsed_ms: TIMER_CEILING_MS,
                        running: false,
                        capped_now: true,
                    }
                } else {
                    self.elapsed_ms = caught_up;
                    self.running = true;
                    self.started_at = Some(now_ms);
                    TickOutcome { elapsed_ms: caught_up, running: true, capped_now: false }
                }
            }
            // A running flag without a start stamp cannot be caught up;
            // treat it as paused data rather than guessing a segment.
            _ => {
                self.elapsed_ms = snapshot.elapsed_ms.min(TIMER_CEILING_MS);
                self.running = false;
                self.started_at = None;
                TickOutcome { elapsed_ms: self.elapsed_ms, running: false, capped_now: false }
            }
        }
    }

    /// Snapshot of the authoritative fields as they stand.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            elapsed_ms: self.elapsed_ms,
            running: self.running,
            started_at: self.started_at,
        }
    }

    /// Snapshot for persistence at `now_ms`, with the live segment folded in.
    ///
    /// While running, the baseline is advanced to the shown time and the
    /// start stamp refreshed to `now_ms`, so a later [`Self::reconcile`]
    /// only needs to add the wall time since this persist. Non-mutating.
    pub fn snapshot_at(&self, now_ms: i64) -> TimerSnapshot {
        if self.running {
            TimerSnapshot {
                elapsed_ms: self.shown_elapsed(now_ms),
                running: true,
                started_at: Some(now_ms),
            }
        } else {
            TimerSnapshot { elapsed_ms: self.elapsed_ms, running: false, started_at: None }
        }
    }
}

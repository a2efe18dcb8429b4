//! Stopwatch snapshot persisted across process restarts

use serde::{Deserialize, Serialize};

/// Persisted stopwatch state.
///
/// Sole source of truth for recovering a session after the process is
/// suspended or killed: `elapsed_ms` is the durable baseline accumulated
/// while paused, `started_at` (epoch ms, present only while running) lets
/// hydration account for wall time spent away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub elapsed_ms: u64,
    pub running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
}

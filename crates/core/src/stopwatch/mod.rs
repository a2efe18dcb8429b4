//! Stopwatch session domain
//!
//! One running/paused elapsed-duration session with a 24-hour ceiling,
//! persisted as a snapshot so it survives process suspension.

pub mod engine;
pub mod ports;
pub mod service;

pub use engine::{StopwatchEngine, StopwatchState, TickOutcome};
pub use ports::SnapshotStore;
pub use service::{CommittedSession, StopwatchService, StopwatchStatus};

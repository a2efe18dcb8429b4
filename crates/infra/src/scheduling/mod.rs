//! Background scheduling for the stopwatch session
//!
//! A single background task keeps the session honest while no command is
//! watching it: periodic ticks let the 24h ceiling land close to real time,
//! and periodic flushes bound how much progress a crash can lose.

pub mod error;
pub mod stopwatch_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use stopwatch_scheduler::{StopwatchScheduler, StopwatchSchedulerConfig};

//! # Fieldlog Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite persistence (notes, reports, user profiles)
//! - The stopwatch snapshot file store
//! - Configuration loading
//! - The background stopwatch scheduler
//! - The HTML report export writer
//!
//! ## Architecture
//! - Implements traits defined in `fieldlog-core`
//! - Depends on `fieldlog-common`, `fieldlog-domain` and `fieldlog-core`
//! - Contains all "impure" code (files, database, clocks, background tasks)

pub mod config;
pub mod database;
pub mod errors;
pub mod export;
pub mod scheduling;
pub mod storage;

// Re-export commonly used items
pub use config::{AppConfig, DatabaseSection, ExportSection, TimerSection, UserSection};
pub use database::{DbManager, SqliteNoteRepository, SqliteReportRepository, SqliteUserProfileRepository};
pub use errors::InfraError;
pub use export::HtmlExporter;
pub use scheduling::{SchedulerError, SchedulerResult, StopwatchScheduler, StopwatchSchedulerConfig};
pub use storage::FileSnapshotStore;

//! Port interfaces for stopwatch persistence
//!
//! These traits define the boundary between the session engine and the
//! storage that lets a session survive process restarts.

use fieldlog_domain::types::TimerSnapshot;

/// Result alias for snapshot store operations.
pub type StorageResult<T> = fieldlog_domain::Result<T>;

/// Trait for persisting the stopwatch snapshot across restarts.
///
/// Loading is best effort: a missing, unreadable or corrupt snapshot is
/// reported as `None` and the session starts idle. The store is synchronous
/// on purpose; writes are small and the service flushes them off the hot
/// path.
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted snapshot, if any usable one exists.
    fn load(&self) -> Option<TimerSnapshot>;

    /// Persist the snapshot, replacing any previous one.
    fn save(&self, snapshot: &TimerSnapshot) -> StorageResult<()>;

    /// Remove the persisted snapshot entirely.
    fn clear(&self) -> StorageResult<()>;
}

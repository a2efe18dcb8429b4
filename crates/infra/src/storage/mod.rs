//! File-backed persistence for stopwatch snapshots

pub mod snapshot_store;

pub use snapshot_store::FileSnapshotStore;

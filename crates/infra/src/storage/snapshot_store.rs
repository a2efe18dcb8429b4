//! JSON snapshot store backing the stopwatch engine
//!
//! The snapshot is a single small JSON file written atomically (temp file
//! plus rename) so a crash mid-write never leaves a half-written state
//! behind. Loading is deliberately forgiving: any unreadable or corrupt
//! file is treated as "no snapshot" and the session starts idle.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fieldlog_core::stopwatch::ports::{SnapshotStore, StorageResult};
use fieldlog_domain::constants::TIMER_SNAPSHOT_FILE;
use fieldlog_domain::types::TimerSnapshot;
use fieldlog_domain::FieldLogError;
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Snapshot store persisting to a JSON file on disk
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store backed by the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store whose snapshot file sits next to the database file
    pub fn for_database(db_path: &Path) -> Self {
        let dir = db_path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        Self { path: dir.join(TIMER_SNAPSHOT_FILE) }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Option<TimerSnapshot> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot file");
            return None;
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "snapshot file unreadable, starting idle"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "snapshot file corrupt, starting idle"
                );
                None
            }
        }
    }

    fn save(&self, snapshot: &TimerSnapshot) -> StorageResult<()> {
        let data = serde_json::to_vec(snapshot).map_err(map_json_error)?;

        // Write to a temp file first, then rename for atomicity.
        let temp_path = self.path.with_extension("tmp");
        if let Some(parent) = temp_path.parent() {
            fs::create_dir_all(parent).map_err(map_io_error)?;
        }

        let mut file = fs::File::create(&temp_path).map_err(map_io_error)?;
        file.write_all(&data).map_err(map_io_error)?;
        file.sync_all().map_err(map_io_error)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(map_io_error)?;

        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(map_io_error)?;
            debug!(path = %self.path.display(), "snapshot file removed");
        }

        let temp_path = self.path.with_extension("tmp");
        if temp_path.exists() {
            fs::remove_file(&temp_path).ok();
        }

        Ok(())
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_io_error(err: std::io::Error) -> FieldLogError {
    FieldLogError::from(InfraError::from(err))
}

fn map_json_error(err: serde_json::Error) -> FieldLogError {
    FieldLogError::from(InfraError::from(err))
}

// =============================================================================
// Tests
// =============================================================================

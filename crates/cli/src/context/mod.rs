//! Application context and dependency wiring
//!
//! One [`AppContext`] per process invocation: configuration resolved, the
//! database opened and migrated, the stopwatch rehydrated from its snapshot
//! file, and every service constructed over Arc-shared ports.

use std::sync::Arc;

use tracing::debug;

use fieldlog_core::{
    DocumentExporter, NoteRepository, NoteService, ReportRepository, ReportService, SnapshotStore,
    StopwatchService, StopwatchStatus, UserProfileRepository,
};
use fieldlog_domain::Result;
use fieldlog_infra::config::AppConfig;
use fieldlog_infra::database::{
    DbManager, SqliteNoteRepository, SqliteReportRepository, SqliteUserProfileRepository,
};
use fieldlog_infra::export::HtmlExporter;
use fieldlog_infra::storage::FileSnapshotStore;

/// Type alias for the user profile repository trait object
pub type DynUserProfileRepository = dyn UserProfileRepository + Send + Sync + 'static;

/// Type alias for the document exporter trait object
pub type DynDocumentExporter = dyn DocumentExporter + Send + Sync + 'static;

/// Shared application state for command handlers.
pub struct AppContext {
    /// Resolved configuration.
    pub config: AppConfig,
    /// Connection pool and migration runner.
    pub db: Arc<DbManager>,
    /// Stopwatch over the persisted snapshot.
    pub stopwatch: Arc<StopwatchService>,
    /// Session state as reconciled at startup. `capped_now` here means the
    /// ceiling was crossed while no process was running.
    pub startup_status: StopwatchStatus,
    /// Note validation and CRUD.
    pub notes: Arc<NoteService>,
    /// Monthly report aggregation.
    pub reports: Arc<ReportService>,
    /// Stored publisher profile.
    pub profiles: Arc<DynUserProfileRepository>,
    /// Report form renderer.
    pub exporter: Arc<DynDocumentExporter>,
}

impl AppContext {
    /// Build the full context from an already-loaded configuration.
    ///
    /// Opens and migrates the database, places the stopwatch snapshot next
    /// to it, and reconciles any persisted session with the wall clock
    /// before the first command runs.
    ///
    /// # Errors
    /// Returns an error when the database cannot be opened or migrated.
    pub fn new_with_config(config: AppConfig) -> Result<Self> {
        let db =
            Arc::new(DbManager::new(&config.database.path, config.database.max_connections)?);
        db.run_migrations()?;
        debug!(path = %config.database.path.display(), "database ready");

        let note_repo: Arc<dyn NoteRepository> =
            Arc::new(SqliteNoteRepository::new(Arc::clone(&db)));
        let report_repo: Arc<dyn ReportRepository> =
            Arc::new(SqliteReportRepository::new(Arc::clone(&db)));
        let profiles: Arc<DynUserProfileRepository> =
            Arc::new(SqliteUserProfileRepository::new(Arc::clone(&db)));

        let snapshot_store: Arc<dyn SnapshotStore> =
            Arc::new(FileSnapshotStore::for_database(&config.database.path));
        let stopwatch = Arc::new(StopwatchService::new(snapshot_store));
        let startup_status = stopwatch.hydrate();

        let notes = Arc::new(NoteService::new(Arc::clone(&note_repo), config.user.id.clone()));
        let reports =
            Arc::new(ReportService::new(note_repo, report_repo, config.user.id.clone()));
        let exporter: Arc<DynDocumentExporter> =
            Arc::new(HtmlExporter::new(config.export.output_dir.clone()));

        Ok(Self {
            config,
            db,
            stopwatch,
            startup_status,
            notes,
            reports,
            profiles,
            exporter,
        })
    }
}

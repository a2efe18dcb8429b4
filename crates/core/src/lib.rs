//! # Fieldlog Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The stopwatch session engine and its persistence port
//! - Note classification, tag-selection rules and draft validation
//! - Monthly report aggregation
//! - Export document assembly
//! - Port/adapter interfaces (traits) for every external boundary
//!
//! ## Architecture Principles
//! - Only depends on `fieldlog-common` and `fieldlog-domain`
//! - No database, file or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod export;
pub mod notes;
pub mod reports;
pub mod stopwatch;
pub mod user;

// Re-export specific items to avoid ambiguity
pub use export::ports::DocumentExporter;
pub use export::{build_document, DocumentRow, ExportOptions, ReportDocument};
pub use notes::ports::NoteRepository;
pub use notes::{
    classify, is_revisit, is_study, validate_draft, ActionSelection, NoteDraft, NoteService,
    RevisitDraft, StudyDraft,
};
pub use reports::ports::ReportRepository;
pub use reports::{assemble_report, month_label, ReportService};
pub use stopwatch::ports::SnapshotStore;
pub use stopwatch::{
    CommittedSession, StopwatchEngine, StopwatchService, StopwatchState, StopwatchStatus,
    TickOutcome,
};
pub use user::ports::UserProfileRepository;

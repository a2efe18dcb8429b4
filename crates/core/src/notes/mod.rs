//! Note rules and services
//!
//! Everything that decides what a note *is*: read-time classification,
//! action-tag selection with study auto-promotion, draft validation, and
//! the service orchestrating persistence through the repository port.

pub mod classification;
pub mod draft;
pub mod ports;
pub mod selection;
pub mod service;

pub use classification::{classify, is_revisit, is_study};
pub use draft::{validate_draft, NoteDraft, RevisitDraft, StudyDraft};
pub use ports::NoteRepository;
pub use selection::ActionSelection;
pub use service::NoteService;

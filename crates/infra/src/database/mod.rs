//! Database implementations

pub mod manager;
pub mod note_repository;
pub mod report_repository;
pub mod user_profile_repository;

pub use manager::{DbConnection, DbManager};
pub use note_repository::SqliteNoteRepository;
pub use report_repository::SqliteReportRepository;
pub use user_profile_repository::SqliteUserProfileRepository;

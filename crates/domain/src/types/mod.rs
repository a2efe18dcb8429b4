//! Domain types and models

pub mod note;
pub mod report;
pub mod timer;
pub mod user;

pub use note::{
    new_note_id, Note, NoteCategory, RevisitField, RevisitRecord, StudyField, StudyRecord,
};
pub use report::{report_id, Report, ReportEntry};
pub use timer::TimerSnapshot;
pub use user::UserProfile;

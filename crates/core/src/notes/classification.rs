//! Read-time note classification
//!
//! Stored notes are never rewritten to resolve their category; these rules
//! interpret whatever shape is on disk, including legacy boolean
//! sub-records and rows where both sections were left enabled.

use fieldlog_domain::constants::{ACTION_ABRIU_ESTUDO, THIRD_VISIT_ACTIONS};
use fieldlog_domain::types::{Note, NoteCategory};

/// A note counts as a study when the study sub-record is enabled, or when
/// its tags say a study was opened or a third visit happened.
pub fn is_study(note: &Note) -> bool {
    note.study_enabled()
        || note.actions.iter().any(|tag| tag == ACTION_ABRIU_ESTUDO)
        || note.actions.iter().any(|tag| THIRD_VISIT_ACTIONS.contains(&tag.as_str()))
}

/// A note counts as a revisit only when it is not a study; study wins when
/// both sub-records are enabled.
pub fn is_revisit(note: &Note) -> bool {
    !is_study(note) && note.revisit.is_enabled()
}

/// Resolve the note's category.
pub fn classify(note: &Note) -> NoteCategory {
    if is_study(note) {
        NoteCategory::Study
    } else if note.revisit.is_enabled() {
        NoteCategory::Revisit
    } else {
        NoteCategory::Other
    }
}

//! Note draft validation
//!
//! The entry form's schema, kept as data-in data-out: a draft of plain
//! strings goes in, and either a well-formed [`Note`] or a field-by-field
//! [`ValidationError`] comes out. Messages are the product's pt-BR copy.
//!
//! Which sub-record is required follows classification, not the section
//! toggles alone: a draft whose tags say "study" must carry the study
//! details even if the section flag was never switched on.

use fieldlog_common::time::{hhmm_to_hours, iso_to_display, looks_like_hhmm, round2};
use fieldlog_common::validation::{ValidationError, ValidationResult};
use fieldlog_domain::constants::{ACTION_ABRIU_ESTUDO, THIRD_VISIT_ACTIONS};
use fieldlog_domain::types::{
    new_note_id, Note, RevisitField, RevisitRecord, StudyField, StudyRecord,
};

/// Raw note input, one string per form field. Empty means left blank.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    /// `yyyy-mm-dd`.
    pub date_iso: String,
    /// `HH:mm` worked time.
    pub hours_hhmm: String,
    pub location_notes: String,
    pub actions: Vec<String>,
    pub revisit: RevisitDraft,
    pub study: StudyDraft,
}

/// Revisit section of the draft.
#[derive(Debug, Clone, Default)]
pub struct RevisitDraft {
    pub enabled: bool,
    pub name: String,
    pub house_number: String,
    /// `yyyy-mm-dd` of the agreed return visit.
    pub visit_date: String,
    /// `HH:mm`.
    pub visit_time: String,
    pub phone: String,
    pub address: String,
}

/// Study section of the draft.
#[derive(Debug, Clone, Default)]
pub struct StudyDraft {
    pub enabled: bool,
    pub name: String,
    pub house_number: String,
    /// Weekday or date the study happens on.
    pub study_day: String,
    /// `HH:mm`.
    pub study_time: String,
    pub phone: String,
    pub address: String,
    pub material: String,
}

/// Validate a draft and build the note it describes.
///
/// All offending fields are reported at once. The built note stores hours
/// rounded to two decimals, drops blank optionals entirely, keeps a
/// disabled revisit record as `{ enabled: false }` and omits the study
/// record when the note is not a study. When the draft classifies as a
/// study, any revisit input is discarded (study wins).
///
/// The note carries a fresh id and no owner; the service stamps ownership.
pub fn validate_draft(draft: &NoteDraft) -> ValidationResult<Note> {
    let mut errors = ValidationError::new();

    let date = draft.date_iso.trim();
    if date.is_empty() {
        errors.add_field_error("date", "Informe a data.");
    } else if iso_to_display(date).is_none() {
        errors.add_field_error("date", "Data inválida.");
    }

    let hours_input = draft.hours_hhmm.trim();
    let mut hours = 0.0;
    if hours_input.is_empty() {
        errors.add_field_error("hours", "Informe as horas.");
    } else if !looks_like_hhmm(hours_input) {
        errors.add_field_error("hours", "Use o formato HH:mm (ex.: 02:30).");
    } else {
        match hhmm_to_hours(hours_input) {
            Some(value) => hours = round2(value),
            None => errors.add_field_error("hours", "Valores entre 00:00 e 24:00."),
        }
    }

    let study_applies = draft_is_study(draft);
    if study_applies {
        require(&mut errors, "study.name", &draft.study.name, "Informe o nome do estudante.");
        require(
            &mut errors,
            "study.house_number",
            &draft.study.house_number,
            "Informe o nº da casa.",
        );
        require(&mut errors, "study.study_day", &draft.study.study_day, "Informe o dia do estudo.");
        require_time(
            &mut errors,
            "study.study_time",
            &draft.study.study_time,
            "Informe o horário do estudo.",
        );
    } else if draft.revisit.enabled {
        require(&mut errors, "revisit.name", &draft.revisit.name, "Informe o nome do morador.");
        require(
            &mut errors,
            "revisit.house_number",
            &draft.revisit.house_number,
            "Informe o nº da casa.",
        );
        require_date(
            &mut errors,
            "revisit.visit_date",
            &draft.revisit.visit_date,
            "Informe a data combinada.",
        );
        require_time(
            &mut errors,
            "revisit.visit_time",
            &draft.revisit.visit_time,
            "Informe o horário combinado.",
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let revisit = if !study_applies && draft.revisit.enabled {
        RevisitField::Record(RevisitRecord {
            enabled: true,
            name: blank_to_none(&draft.revisit.name),
            house_number: blank_to_none(&draft.revisit.house_number),
            visit_date: blank_to_none(&draft.revisit.visit_date),
            visit_time: blank_to_none(&draft.revisit.visit_time),
            phone: blank_to_none(&draft.revisit.phone),
            address: blank_to_none(&draft.revisit.address),
        })
    } else {
        RevisitField::disabled()
    };

    let study = study_applies.then(|| {
        StudyField::Record(StudyRecord {
            enabled: true,
            name: blank_to_none(&draft.study.name),
            house_number: blank_to_none(&draft.study.house_number),
            study_day: blank_to_none(&draft.study.study_day),
            study_time: blank_to_none(&draft.study.study_time),
            phone: blank_to_none(&draft.study.phone),
            address: blank_to_none(&draft.study.address),
            material: blank_to_none(&draft.study.material),
        })
    });

    Ok(Note {
        id: new_note_id(),
        date: date.to_string(),
        hours,
        location_notes: blank_to_none(&draft.location_notes),
        actions: draft.actions.clone(),
        revisit,
        study,
        user_id: None,
        created_at: None,
        updated_at: None,
    })
}

/// Same classification as read-time, applied to the draft's raw fields.
fn draft_is_study(draft: &NoteDraft) -> bool {
    draft.study.enabled
        || draft.actions.iter().any(|tag| tag == ACTION_ABRIU_ESTUDO)
        || draft.actions.iter().any(|tag| THIRD_VISIT_ACTIONS.contains(&tag.as_str()))
}

fn require(errors: &mut ValidationError, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add_field_error(field, message);
    }
}

fn require_date(errors: &mut ValidationError, field: &str, value: &str, message: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add_field_error(field, message);
    } else if iso_to_display(value).is_none() {
        errors.add_field_error(field, "Data inválida.");
    }
}

fn require_time(errors: &mut ValidationError, field: &str, value: &str, message: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add_field_error(field, message);
    } else if hhmm_to_hours(value).is_none() {
        errors.add_field_error(field, "Use o formato HH:mm (ex.: 02:30).");
    }
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use fieldlog_domain::constants::ACTION_TERCEIRA_REVISITA_ESTUDO;
    use fieldlog_domain::types::NoteCategory;

    use super::super::classification::classify;
    use super::*;

    fn minimal_draft() -> NoteDraft {
        NoteDraft {
            date_iso: "2025-03-07".into(),
            hours_hhmm: "02:30".into(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn minimal_draft_builds_a_plain_note() {
        let note = validate_draft(&minimal_draft()).unwrap();

        assert_eq!(note.date, "2025-03-07");
        assert_eq!(note.hours, 2.5);
        assert_eq!(note.location_notes, None);
        assert!(note.study.is_none());
        assert!(!note.revisit.is_enabled());
        assert_eq!(classify(&note), NoteCategory::Other);
        assert!(note.user_id.is_none());
        assert!(!note.id.is_empty());
    }

    #[test]
    fn missing_date_and_hours_report_together() {
        let err = validate_draft(&NoteDraft::default()).unwrap_err();

        assert_eq!(err.message_for("date"), Some("Informe a data."));
        assert_eq!(err.message_for("hours"), Some("Informe as horas."));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut draft = minimal_draft();
        draft.date_iso = "07/03/2025".into();

        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("date"), Some("Data inválida."));
    }

    #[test]
    fn hour_shape_and_range_use_distinct_messages() {
        let mut draft = minimal_draft();
        draft.hours_hhmm = "abc".into();
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("hours"), Some("Use o formato HH:mm (ex.: 02:30)."));

        draft.hours_hhmm = "25:00".into();
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("hours"), Some("Valores entre 00:00 e 24:00."));

        draft.hours_hhmm = "2:70".into();
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("hours"), Some("Valores entre 00:00 e 24:00."));
    }

    #[test]
    fn hours_are_rounded_to_two_decimals() {
        let mut draft = minimal_draft();
        draft.hours_hhmm = "02:47".into();

        let note = validate_draft(&draft).unwrap();
        assert_eq!(note.hours, 2.78);
    }

    #[test]
    fn enabled_revisit_requires_its_fields() {
        let mut draft = minimal_draft();
        draft.revisit.enabled = true;

        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("revisit.name"), Some("Informe o nome do morador."));
        assert_eq!(err.message_for("revisit.house_number"), Some("Informe o nº da casa."));
        assert_eq!(err.message_for("revisit.visit_date"), Some("Informe a data combinada."));
        assert_eq!(err.message_for("revisit.visit_time"), Some("Informe o horário combinado."));
    }

    #[test]
    fn third_visit_tag_requires_study_fields_even_without_the_flag() {
        let mut draft = minimal_draft();
        draft.actions = vec![ACTION_TERCEIRA_REVISITA_ESTUDO.into()];

        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("study.name"), Some("Informe o nome do estudante."));
        assert_eq!(err.message_for("study.study_day"), Some("Informe o dia do estudo."));
        assert_eq!(err.message_for("study.study_time"), Some("Informe o horário do estudo."));
    }

    #[test]
    fn study_draft_builds_a_study_note_and_discards_revisit_input() {
        let mut draft = minimal_draft();
        draft.study = StudyDraft {
            enabled: true,
            name: "Maria".into(),
            house_number: "7".into(),
            study_day: "Quarta".into(),
            study_time: "19:00".into(),
            material: "Seja Feliz para Sempre".into(),
            ..StudyDraft::default()
        };
        draft.revisit = RevisitDraft {
            enabled: true,
            name: "João".into(),
            house_number: "12".into(),
            visit_date: "2025-03-15".into(),
            visit_time: "14:30".into(),
            ..RevisitDraft::default()
        };

        let note = validate_draft(&draft).unwrap();
        assert_eq!(classify(&note), NoteCategory::Study);
        assert!(!note.revisit.is_enabled());
        assert!(note.revisit.record().is_some_and(|r| r.name.is_none()));

        let study = note.study.as_ref().and_then(StudyField::record).unwrap();
        assert_eq!(study.name.as_deref(), Some("Maria"));
        assert_eq!(study.material.as_deref(), Some("Seja Feliz para Sempre"));
    }

    #[test]
    fn revisit_draft_builds_a_revisit_note() {
        let mut draft = minimal_draft();
        draft.revisit = RevisitDraft {
            enabled: true,
            name: "João".into(),
            house_number: "12".into(),
            visit_date: "2025-03-15".into(),
            visit_time: "14:30".into(),
            phone: "".into(),
            address: "  ".into(),
        };

        let note = validate_draft(&draft).unwrap();
        assert_eq!(classify(&note), NoteCategory::Revisit);

        let record = note.revisit.record().unwrap();
        assert!(record.enabled);
        assert_eq!(record.name.as_deref(), Some("João"));
        assert_eq!(record.visit_date.as_deref(), Some("2025-03-15"));
        // Blank strings never survive into storage.
        assert_eq!(record.phone, None);
        assert_eq!(record.address, None);
    }

    #[test]
    fn revisit_sub_dates_and_times_are_shape_checked() {
        let mut draft = minimal_draft();
        draft.revisit = RevisitDraft {
            enabled: true,
            name: "João".into(),
            house_number: "12".into(),
            visit_date: "15/03/2025".into(),
            visit_time: "99:99".into(),
            ..RevisitDraft::default()
        };

        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.message_for("revisit.visit_date"), Some("Data inválida."));
        assert_eq!(
            err.message_for("revisit.visit_time"),
            Some("Use o formato HH:mm (ex.: 02:30).")
        );
    }
}

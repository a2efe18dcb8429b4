//! Report assembly - pure aggregation of one month's notes
//!
//! Month membership is a string prefix check on the ISO date, the same
//! rule the rest of the app buckets by. No timezone conversion happens
//! anywhere in here.

use fieldlog_common::time::{current_month_key, round2};
use fieldlog_domain::types::{report_id, Note, Report, ReportEntry};

use crate::notes::classification::{is_revisit, is_study};

const MONTH_NAMES_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Build the report for `month` out of `notes`.
///
/// Notes outside the month are ignored; the rest are sorted ascending by
/// date and reduced to classification flags plus hours. `is_closed` is
/// decided against the current local month at this moment and never
/// recomputed afterwards. Stamps are left unset; persistence owns them.
pub fn assemble_report(user_id: &str, month: &str, notes: &[Note]) -> Report {
    let mut bucket: Vec<&Note> =
        notes.iter().filter(|note| note.date.get(0..7) == Some(month)).collect();
    bucket.sort_by(|a, b| a.date.cmp(&b.date));

    let entries: Vec<ReportEntry> = bucket
        .iter()
        .map(|note| ReportEntry {
            date: note.date.clone(),
            hours: note.hours,
            revisit: is_revisit(note),
            study: is_study(note),
        })
        .collect();

    let total_hours = round2(entries.iter().map(|entry| entry.hours).sum());

    Report {
        id: report_id(user_id, month),
        month: month.to_string(),
        period_label: month_label(month),
        entries,
        total_hours,
        is_closed: month != current_month_key(),
        user_id: Some(user_id.to_string()),
        created_at: None,
        updated_at: None,
    }
}

/// pt-BR label for a `yyyy-mm` key: capitalized month name plus year
/// ("Março de 2025"). A malformed key falls back to the current local
/// month; this never fails.
pub fn month_label(month: &str) -> String {
    let resolved = parse_month_key(month).or_else(|| parse_month_key(&current_month_key()));

    match resolved {
        Some((year, index)) => {
            let name = MONTH_NAMES_PT[index];
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => format!("{}{} de {year}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        }
        // Unreachable while current_month_key() stays well-formed.
        None => String::new(),
    }
}

fn parse_month_key(key: &str) -> Option<(i32, usize)> {
    let (year, month) = key.split_once('-')?;
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: usize = month.parse().ok()?;

    (1..=12).contains(&month).then(|| (year, month - 1))
}

#[cfg(test)]
mod tests {
    use fieldlog_domain::constants::ACTION_ABRIU_ESTUDO;
    use fieldlog_domain::types::{new_note_id, RevisitField, StudyField};

    use super::*;

    fn note(date: &str, hours: f64) -> Note {
        Note {
            id: new_note_id(),
            date: date.into(),
            hours,
            location_notes: None,
            actions: vec![],
            revisit: RevisitField::disabled(),
            study: None,
            user_id: Some("local".into()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn filters_to_the_month_and_sorts_ascending() {
        let notes = vec![
            note("2025-03-21", 1.0),
            note("2025-04-02", 9.0),
            note("2025-03-07", 2.0),
            note("2024-03-07", 9.0),
        ];

        let report = assemble_report("local", "2025-03", &notes);
        let dates: Vec<&str> = report.entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, ["2025-03-07", "2025-03-21"]);
        assert_eq!(report.id, "local-2025-03");
        assert_eq!(report.month, "2025-03");
        assert_eq!(report.total_hours, 3.0);
    }

    #[test]
    fn entry_flags_follow_classification_with_study_winning() {
        let mut study = note("2025-03-10", 1.5);
        study.actions = vec![ACTION_ABRIU_ESTUDO.into()];
        study.revisit = RevisitField::Flag(true);

        let mut revisit = note("2025-03-11", 0.5);
        revisit.revisit = RevisitField::Flag(true);

        let plain = note("2025-03-12", 1.0);

        let report = assemble_report("local", "2025-03", &[study, revisit, plain]);
        assert_eq!(
            report.entries.iter().map(|e| (e.study, e.revisit)).collect::<Vec<_>>(),
            [(true, false), (false, true), (false, false)]
        );
    }

    #[test]
    fn total_is_rounded_to_two_decimals() {
        // 0.1 + 0.2 famously sums to 0.30000000000000004.
        let notes = vec![
            note("2025-03-01", 0.1),
            note("2025-03-02", 0.2),
            note("2025-03-03", 1.25),
        ];

        let report = assemble_report("local", "2025-03", &notes);
        assert_eq!(report.total_hours, 1.55);
    }

    #[test]
    fn empty_month_yields_an_empty_open_or_closed_report() {
        let report = assemble_report("local", "1999-01", &[]);
        assert!(report.entries.is_empty());
        assert_eq!(report.total_hours, 0.0);
        // 1999-01 is long past, so the report is closed.
        assert!(report.is_closed);

        let current = current_month_key();
        let report = assemble_report("local", &current, &[]);
        assert!(!report.is_closed);
    }

    #[test]
    fn legacy_boolean_study_flags_still_count() {
        let mut legacy = note("2025-03-05", 2.0);
        legacy.study = Some(StudyField::Flag(true));

        let report = assemble_report("local", "2025-03", &[legacy]);
        assert!(report.entries[0].study);
        assert!(!report.entries[0].revisit);
    }

    #[test]
    fn month_labels_are_capitalized_pt_br() {
        assert_eq!(month_label("2025-03"), "Março de 2025");
        assert_eq!(month_label("2024-01"), "Janeiro de 2024");
        assert_eq!(month_label("1999-12"), "Dezembro de 1999");
    }

    #[test]
    fn malformed_month_key_falls_back_to_the_current_month() {
        let current = month_label(&current_month_key());
        assert!(!current.is_empty());

        assert_eq!(month_label("banana"), current);
        assert_eq!(month_label("2025-13"), current);
        assert_eq!(month_label("25-03"), current);
        assert_eq!(month_label(""), current);
    }
}

//! Export document - deterministic view of a report
//!
//! Every field the printable activity form shows is resolved here, so the
//! renderer only substitutes strings. Same report, same options, same
//! document.

use fieldlog_common::time::{hours_to_hhmm, iso_to_display, timestamp_to_display_date};
use fieldlog_domain::types::Report;

/// Placeholder the form shows for anything unresolved.
const PLACEHOLDER: &str = "—";

/// Caller choices for one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Overrides the participant name shown on the form.
    pub participant_name: Option<String>,
    /// Fallback name when no explicit participant is given.
    pub author: Option<String>,
    /// Service roles that do not report hour counts export without them.
    pub include_hours: bool,
    pub observations: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { participant_name: None, author: None, include_hours: true, observations: None }
    }
}

/// Resolved form content, ready for substitution into the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    /// `yyyy-mm`; names the output file.
    pub month: String,
    pub participant_name: String,
    pub period_label: String,
    /// The participation checkbox; generating a report at all means field
    /// service happened, so this is always checked.
    pub participated: bool,
    /// Number of study-classified entries.
    pub study_count: usize,
    /// Whole hours (floor), present only when hours are reported.
    pub hours: Option<u64>,
    /// Free-text block; empty when nothing was provided.
    pub observations: String,
    /// Display date the report was first generated, or the placeholder.
    pub generated_at: String,
    pub rows: Vec<DocumentRow>,
}

/// One entry line of the detail table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    /// `dd/mm/yyyy`; raw stored string when it cannot be converted.
    pub date: String,
    /// `HH:mm`.
    pub hours: String,
    /// "Estudo", "Revisita" or empty.
    pub label: String,
}

/// Build the export document for `report`.
pub fn build_document(report: &Report, options: &ExportOptions) -> ReportDocument {
    let participant_name = [options.participant_name.as_deref(), options.author.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string();

    let rows: Vec<DocumentRow> = report
        .entries
        .iter()
        .map(|entry| DocumentRow {
            date: iso_to_display(&entry.date).unwrap_or_else(|| entry.date.clone()),
            hours: hours_to_hhmm(entry.hours),
            label: if entry.study {
                "Estudo".to_string()
            } else if entry.revisit {
                "Revisita".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    ReportDocument {
        month: report.month.clone(),
        participant_name,
        period_label: report.period_label.clone(),
        participated: true,
        study_count: report.entries.iter().filter(|entry| entry.study).count(),
        hours: options.include_hours.then(|| report.total_hours.floor() as u64),
        observations: options
            .observations
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        generated_at: report
            .created_at
            .and_then(timestamp_to_display_date)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use fieldlog_domain::types::ReportEntry;

    use super::*;

    fn report() -> Report {
        Report {
            id: "local-2025-03".into(),
            month: "2025-03".into(),
            period_label: "Março de 2025".into(),
            entries: vec![
                ReportEntry { date: "2025-03-07".into(), hours: 2.5, revisit: true, study: false },
                ReportEntry { date: "2025-03-10".into(), hours: 1.0, revisit: false, study: true },
                ReportEntry { date: "2025-03-21".into(), hours: 0.75, revisit: false, study: false },
            ],
            total_hours: 4.25,
            is_closed: false,
            user_id: Some("local".into()),
            created_at: Some(1_741_305_600_000),
            updated_at: Some(1_741_305_600_000),
        }
    }

    #[test]
    fn participant_name_falls_back_name_then_author_then_placeholder() {
        let base = report();

        let doc = build_document(
            &base,
            &ExportOptions {
                participant_name: Some("Maria Silva".into()),
                author: Some("ignored".into()),
                ..ExportOptions::default()
            },
        );
        assert_eq!(doc.participant_name, "Maria Silva");

        let doc = build_document(
            &base,
            &ExportOptions { author: Some("João".into()), ..ExportOptions::default() },
        );
        assert_eq!(doc.participant_name, "João");

        let doc = build_document(&base, &ExportOptions::default());
        assert_eq!(doc.participant_name, "—");

        // Blank strings do not count as provided.
        let doc = build_document(
            &base,
            &ExportOptions {
                participant_name: Some("   ".into()),
                author: Some("João".into()),
                ..ExportOptions::default()
            },
        );
        assert_eq!(doc.participant_name, "João");
    }

    #[test]
    fn hours_are_floored_and_optional() {
        let mut base = report();
        base.total_hours = 23.7;

        let doc = build_document(&base, &ExportOptions::default());
        assert_eq!(doc.hours, Some(23));

        let doc = build_document(
            &base,
            &ExportOptions { include_hours: false, ..ExportOptions::default() },
        );
        assert_eq!(doc.hours, None);
    }

    #[test]
    fn checkbox_is_always_checked_and_studies_counted() {
        let doc = build_document(&report(), &ExportOptions::default());
        assert!(doc.participated);
        assert_eq!(doc.study_count, 1);
    }

    #[test]
    fn rows_carry_display_dates_hhmm_and_labels() {
        let doc = build_document(&report(), &ExportOptions::default());

        let rows: Vec<(&str, &str, &str)> = doc
            .rows
            .iter()
            .map(|row| (row.date.as_str(), row.hours.as_str(), row.label.as_str()))
            .collect();
        assert_eq!(
            rows,
            [
                ("07/03/2025", "02:30", "Revisita"),
                ("10/03/2025", "01:00", "Estudo"),
                ("21/03/2025", "00:45", ""),
            ]
        );
    }

    #[test]
    fn malformed_entry_date_falls_back_to_the_raw_string() {
        let mut base = report();
        base.entries[0].date = "não-data".into();

        let doc = build_document(&base, &ExportOptions::default());
        assert_eq!(doc.rows[0].date, "não-data");
    }

    #[test]
    fn unset_creation_stamp_shows_the_placeholder() {
        let mut base = report();
        base.created_at = None;

        let doc = build_document(&base, &ExportOptions::default());
        assert_eq!(doc.generated_at, "—");

        let doc = build_document(&report(), &ExportOptions::default());
        assert_ne!(doc.generated_at, "—");
        assert!(doc.generated_at.contains('/'));
    }

    #[test]
    fn observations_default_to_empty() {
        let doc = build_document(&report(), &ExportOptions::default());
        assert_eq!(doc.observations, "");

        let doc = build_document(
            &report(),
            &ExportOptions {
                observations: Some("  Pregação no território 12.  ".into()),
                ..ExportOptions::default()
            },
        );
        assert_eq!(doc.observations, "Pregação no território 12.");
    }
}

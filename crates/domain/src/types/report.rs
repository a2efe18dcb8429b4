//! Monthly report types

use serde::{Deserialize, Serialize};

/// Deterministic report id for one (user, month) pair.
///
/// At most one report exists per user per month: regenerating the same
/// month overwrites instead of duplicating.
pub fn report_id(user_id: &str, month: &str) -> String {
    format!("{user_id}-{month}")
}

/// One aggregation snapshot for one (user, calendar-month) pair.
///
/// Entries are a derived, point-in-time copy: editing a source note later
/// does not retroactively change a generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    /// `yyyy-mm`.
    pub month: String,
    /// Localized, capitalized month + year label ("Março de 2025").
    pub period_label: String,
    /// Sorted ascending by date.
    pub entries: Vec<ReportEntry>,
    /// Sum of entry hours, two decimals.
    pub total_hours: f64,
    /// True when `month` was no longer the current month at generation time.
    pub is_closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Preserved across regenerations via merge-upsert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Aggregate-relevant fields of one source note at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// ISO `yyyy-mm-dd` of the source note.
    pub date: String,
    pub hours: f64,
    /// Classification flags; study wins, so at most one is true.
    #[serde(rename = "revisita")]
    pub revisit: bool,
    #[serde(rename = "estudo")]
    pub study: bool,
}

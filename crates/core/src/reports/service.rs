//! Report service - generation and retrieval for one acting user

use std::sync::Arc;

use fieldlog_common::time::current_month_key;
use fieldlog_domain::types::{report_id, Report};
use fieldlog_domain::Result;
use tracing::info;

use super::assembler::assemble_report;
use super::ports::ReportRepository;
use crate::notes::ports::NoteRepository;

/// Report service for one acting user.
pub struct ReportService {
    notes: Arc<dyn NoteRepository>,
    reports: Arc<dyn ReportRepository>,
    user_id: String,
}

impl ReportService {
    /// Create a new report service scoped to `user_id`.
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        reports: Arc<dyn ReportRepository>,
        user_id: impl Into<String>,
    ) -> Self {
        Self { notes, reports, user_id: user_id.into() }
    }

    /// Aggregate the current month's notes and store the report.
    ///
    /// Idempotent per month: the composite id makes a rerun overwrite the
    /// entries and total while the merge-upsert keeps the original
    /// creation stamp.
    pub async fn generate_and_save_current_month(&self) -> Result<Report> {
        let month = current_month_key();
        let notes = self.notes.list_for_user(&self.user_id).await?;
        let report = assemble_report(&self.user_id, &month, &notes);

        let stored = self.reports.upsert_merge(&report).await?;
        info!(
            month = %stored.month,
            entries = stored.entries.len(),
            total_hours = stored.total_hours,
            "Generated monthly report"
        );
        Ok(stored)
    }

    /// All of the acting user's reports, newest month first.
    pub async fn list(&self) -> Result<Vec<Report>> {
        self.reports.list_for_user(&self.user_id).await
    }

    /// The acting user's report for one `yyyy-mm` month, if generated.
    pub async fn find_by_month(&self, month: &str) -> Result<Option<Report>> {
        self.reports.find_by_month(&self.user_id, month).await
    }

    /// Delete the acting user's report for one month.
    pub async fn delete(&self, month: &str) -> Result<()> {
        self.reports.delete(&report_id(&self.user_id, month)).await
    }
}

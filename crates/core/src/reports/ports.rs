//! Port interfaces for report persistence

use async_trait::async_trait;
use fieldlog_domain::types::Report;
use fieldlog_domain::Result;

/// Trait for persisting monthly reports.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert or overwrite the report under its composite id.
    ///
    /// Merge semantics: the first write stamps `created_at` and every
    /// write refreshes `updated_at`; regenerating a month never loses the
    /// original creation stamp. Returns the stored report.
    async fn upsert_merge(&self, report: &Report) -> Result<Report>;

    /// Look a report up by its composite id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Report>>;

    /// Look a user's report up by month key.
    async fn find_by_month(&self, user_id: &str, month: &str) -> Result<Option<Report>>;

    /// All reports for a user, newest month first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Report>>;

    /// Delete a report by id. `NotFound` when no such report exists.
    async fn delete(&self, id: &str) -> Result<()>;
}

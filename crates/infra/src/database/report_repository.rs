//! Report repository implementation using SQLite
//!
//! Persists monthly aggregation snapshots. The composite row id
//! ("{user_id}-{month}") makes regeneration an in-place upsert; the
//! conflict clause leaves `created_at` alone so the original generation
//! stamp survives any number of regenerations.

use std::sync::Arc;

use async_trait::async_trait;
use fieldlog_common::time::now_ms;
use fieldlog_core::reports::ports::ReportRepository as ReportRepositoryPort;
use fieldlog_domain::types::Report;
use fieldlog_domain::{FieldLogError, Result as DomainResult};
use rusqlite::{params, Connection, Row, ToSql};
use tokio::task;

use super::manager::DbManager;
use crate::errors::InfraError;

const SELECT_REPORT: &str = "SELECT id, user_id, month, period_label, entries, total_hours, \
                             is_closed, created_at, updated_at \
                             FROM reports WHERE id = ?1";

const SELECT_REPORT_FOR_MONTH: &str =
    "SELECT id, user_id, month, period_label, entries, total_hours, \
     is_closed, created_at, updated_at \
     FROM reports WHERE user_id = ?1 AND month = ?2";

const SELECT_REPORTS_FOR_USER: &str =
    "SELECT id, user_id, month, period_label, entries, total_hours, \
     is_closed, created_at, updated_at \
     FROM reports WHERE user_id = ?1 \
     ORDER BY month DESC";

/// SQLite-backed implementation of `ReportRepository`
pub struct SqliteReportRepository {
    db: Arc<DbManager>,
}

impl SqliteReportRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepositoryPort for SqliteReportRepository {
    async fn upsert_merge(&self, report: &Report) -> DomainResult<Report> {
        let db = Arc::clone(&self.db);
        let report = report.clone();

        task::spawn_blocking(move || -> DomainResult<Report> {
            let conn = db.get_connection()?;

            upsert_report(&conn, &report, now_ms())?;

            get_report(&conn, &report.id)?.ok_or_else(|| {
                FieldLogError::Database(format!("report vanished after upsert: {}", report.id))
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Report>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Report>> {
            let conn = db.get_connection()?;
            get_report(&conn, &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_month(&self, user_id: &str, month: &str) -> DomainResult<Option<Report>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();
        let month = month.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Report>> {
            let conn = db.get_connection()?;

            let result =
                conn.query_row(SELECT_REPORT_FOR_MONTH, params![&user_id, &month], map_report_row);

            match result {
                Ok(report) => Ok(Some(report)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<Report>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Report>> {
            let conn = db.get_connection()?;

            let mut stmt = conn.prepare(SELECT_REPORTS_FOR_USER).map_err(map_sql_error)?;
            let reports = stmt
                .query_map(params![&user_id], map_report_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(reports)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;

            let affected = conn
                .execute("DELETE FROM reports WHERE id = ?1", params![&id])
                .map_err(map_sql_error)?;
            if affected == 0 {
                return Err(FieldLogError::NotFound(format!("report not found: {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a Report
fn map_report_row(row: &Row) -> rusqlite::Result<Report> {
    let entries_raw: String = row.get(4)?;

    Ok(Report {
        id: row.get(0)?,
        month: row.get(2)?,
        period_label: row.get(3)?,
        entries: json_column(4, &entries_raw)?,
        total_hours: row.get(5)?,
        is_closed: int_to_bool(row.get(6)?),
        user_id: row.get(1)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert or overwrite a report under its composite id.
///
/// `created_at` is set on first insert only; the conflict clause
/// deliberately omits it so regeneration keeps the original stamp.
fn upsert_report(conn: &Connection, report: &Report, now: i64) -> DomainResult<()> {
    let entries = to_json(&report.entries)?;

    let params: [&dyn ToSql; 9] = [
        &report.id,
        &report.user_id,
        &report.month,
        &report.period_label,
        &entries,
        &report.total_hours,
        &bool_to_int(report.is_closed),
        &now,
        &now,
    ];

    conn.execute(
        "INSERT INTO reports (
            id, user_id, month, period_label, entries, total_hours, is_closed,
            created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET
            user_id = excluded.user_id,
            month = excluded.month,
            period_label = excluded.period_label,
            entries = excluded.entries,
            total_hours = excluded.total_hours,
            is_closed = excluded.is_closed,
            updated_at = excluded.updated_at",
        params.as_slice(),
    )
    .map_err(map_sql_error)?;

    Ok(())
}

/// Fetch a report by id
fn get_report(conn: &Connection, id: &str) -> DomainResult<Option<Report>> {
    let result = conn.query_row(SELECT_REPORT, params![&id], map_report_row);

    match result {
        Ok(report) => Ok(Some(report)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(err) => Err(map_sql_error(err)),
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_sql_error(err: rusqlite::Error) -> FieldLogError {
    FieldLogError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> FieldLogError {
    FieldLogError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Utility Functions
// =============================================================================

fn to_json<T: serde::Serialize>(value: &T) -> DomainResult<String> {
    serde_json::to_string(value)
        .map_err(|err| FieldLogError::Database(format!("failed to encode JSON column: {err}")))
}

fn json_column<T: serde::de::DeserializeOwned>(idx: usize, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64) -> bool {
    value != 0
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use fieldlog_domain::types::{report_id, ReportEntry};
    use tempfile::TempDir;

    use super::*;

    fn setup_test_db() -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(&db_path, 4).expect("create db manager");
        manager.run_migrations().expect("run migrations");
        (Arc::new(manager), temp_dir)
    }

    fn create_test_report(month: &str) -> Report {
        Report {
            id: report_id("local", month),
            month: month.into(),
            period_label: format!("Mês de {month}"),
            entries: vec![
                ReportEntry { date: format!("{month}-05"), hours: 2.0, revisit: true, study: false },
                ReportEntry { date: format!("{month}-12"), hours: 1.5, revisit: false, study: true },
            ],
            total_hours: 3.5,
            is_closed: false,
            user_id: Some("local".into()),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upsert_and_find_round_trips_entries() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteReportRepository::new(db);

        let stored = repo.upsert_merge(&create_test_report("2025-03")).await.expect("upsert");
        assert!(stored.created_at.is_some());

        let found =
            repo.find_by_id("local-2025-03").await.expect("find").expect("report exists");
        assert_eq!(found.month, "2025-03");
        assert_eq!(found.entries.len(), 2);
        assert_eq!(found.entries[1].hours, 1.5);
        assert!(found.entries[1].study);
        assert_eq!(found.total_hours, 3.5);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn regeneration_preserves_created_at() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteReportRepository::new(db);

        let first = repo.upsert_merge(&create_test_report("2025-03")).await.expect("first");

        let mut regenerated = create_test_report("2025-03");
        regenerated.entries.pop();
        regenerated.total_hours = 2.0;
        regenerated.is_closed = true;

        let second = repo.upsert_merge(&regenerated).await.expect("second");

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.entries.len(), 1);
        assert_eq!(second.total_hours, 2.0);
        assert!(second.is_closed);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn find_by_month_matches_user_and_month() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteReportRepository::new(db);

        repo.upsert_merge(&create_test_report("2025-03")).await.expect("upsert");

        let found = repo.find_by_month("local", "2025-03").await.expect("find");
        assert!(found.is_some());

        assert!(repo.find_by_month("local", "2025-04").await.expect("find").is_none());
        assert!(repo.find_by_month("other", "2025-03").await.expect("find").is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn list_is_newest_month_first() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteReportRepository::new(db);

        repo.upsert_merge(&create_test_report("2025-01")).await.expect("upsert");
        repo.upsert_merge(&create_test_report("2025-03")).await.expect("upsert");
        repo.upsert_merge(&create_test_report("2024-12")).await.expect("upsert");

        let reports = repo.list_for_user("local").await.expect("list");
        let months: Vec<&str> = reports.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["2025-03", "2025-01", "2024-12"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_removes_row_and_missing_is_not_found() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteReportRepository::new(db);

        repo.upsert_merge(&create_test_report("2025-03")).await.expect("upsert");
        repo.delete("local-2025-03").await.expect("delete");

        assert!(repo.find_by_id("local-2025-03").await.expect("find").is_none());
        assert!(matches!(
            repo.delete("local-2025-03").await,
            Err(FieldLogError::NotFound(_))
        ));
    }
}

//! User profile repository implementation using SQLite
//!
//! Persists the locally stored profile whose display fields prefill the
//! export form.

use std::sync::Arc;

use async_trait::async_trait;
use fieldlog_common::time::now_ms;
use fieldlog_core::user::ports::UserProfileRepository as UserProfileRepositoryPort;
use fieldlog_domain::types::UserProfile;
use fieldlog_domain::{FieldLogError, Result as DomainResult};
use rusqlite::{params, Connection, Row, ToSql};
use tokio::task;

use super::manager::DbManager;
use crate::errors::InfraError;

const SELECT_PROFILE: &str = "SELECT id, email, full_name, congregation, city, state, \
                              birth_date, created_at, updated_at \
                              FROM user_profiles WHERE id = ?1";

/// SQLite-backed implementation of `UserProfileRepository`
pub struct SqliteUserProfileRepository {
    db: Arc<DbManager>,
}

impl SqliteUserProfileRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserProfileRepositoryPort for SqliteUserProfileRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<UserProfile>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<UserProfile>> {
            let conn = db.get_connection()?;
            get_profile(&conn, &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert(&self, profile: &UserProfile) -> DomainResult<UserProfile> {
        let db = Arc::clone(&self.db);
        let profile = profile.clone();

        task::spawn_blocking(move || -> DomainResult<UserProfile> {
            let conn = db.get_connection()?;

            upsert_profile(&conn, &profile, now_ms())?;

            get_profile(&conn, &profile.id)?.ok_or_else(|| {
                FieldLogError::Database(format!("profile vanished after upsert: {}", profile.id))
            })
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
                .execute("DELETE FROM user_profiles WHERE id = ?1", params![&id])
                .map_err(map_sql_error)?;
            if affected == 0 {
                return Err(FieldLogError::NotFound(format!("profile not found: {id}")));
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

/// Map a row to a UserProfile
fn map_profile_row(row: &Row) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        congregation: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        birth_date: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert or overwrite a profile; `created_at` keeps its first-write value.
fn upsert_profile(conn: &Connection, profile: &UserProfile, now: i64) -> DomainResult<()> {
    let params: [&dyn ToSql; 9] = [
        &profile.id,
        &profile.email,
        &profile.full_name,
        &profile.congregation,
        &profile.city,
        &profile.state,
        &profile.birth_date,
        &now,
        &now,
    ];

    conn.execute(
        "INSERT INTO user_profiles (
            id, email, full_name, congregation, city, state, birth_date,
            created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET
            email = excluded.email,
            full_name = excluded.full_name,
            congregation = excluded.congregation,
            city = excluded.city,
            state = excluded.state,
            birth_date = excluded.birth_date,
            updated_at = excluded.updated_at",
        params.as_slice(),
    )
    .map_err(map_sql_error)?;

    Ok(())
}

/// Fetch a profile by id
fn get_profile(conn: &Connection, id: &str) -> DomainResult<Option<UserProfile>> {
    let result = conn.query_row(SELECT_PROFILE, params![&id], map_profile_row);

    match result {
        Ok(profile) => Ok(Some(profile)),
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
// Tests
// =============================================================================

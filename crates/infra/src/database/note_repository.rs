//! Note repository implementation using SQLite
//!
//! Persists field-service notes with their action tags and revisit/study
//! sub-records. Sub-records are stored as JSON columns in their wire shape,
//! so legacy bare-boolean values survive round-trips untouched.

use std::sync::Arc;

use async_trait::async_trait;
use fieldlog_common::time::now_ms;
use fieldlog_core::notes::ports::NoteRepository as NoteRepositoryPort;
use fieldlog_domain::types::Note;
use fieldlog_domain::{FieldLogError, Result as DomainResult};
use rusqlite::{params, Connection, Row, ToSql};
use tokio::task;

use super::manager::DbManager;
use crate::errors::InfraError;

const SELECT_NOTE: &str = "SELECT id, user_id, date, hours, location_notes, actions, revisit, \
                           study, created_at, updated_at \
                           FROM notes WHERE id = ?1";

const SELECT_NOTES_FOR_USER: &str =
    "SELECT id, user_id, date, hours, location_notes, actions, revisit, \
     study, created_at, updated_at \
     FROM notes WHERE user_id = ?1 \
     ORDER BY date DESC, created_at DESC";

/// SQLite-backed implementation of `NoteRepository`
pub struct SqliteNoteRepository {
    db: Arc<DbManager>,
}

impl SqliteNoteRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepositoryPort for SqliteNoteRepository {
    async fn save(&self, note: &Note) -> DomainResult<Note> {
        let db = Arc::clone(&self.db);
        let mut note = note.clone();

        task::spawn_blocking(move || -> DomainResult<Note> {
            let conn = db.get_connection()?;

            let now = now_ms();
            note.created_at = Some(now);
            note.updated_at = Some(now);

            insert_note(&conn, &note)?;
            Ok(note)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, note: &Note) -> DomainResult<Note> {
        let db = Arc::clone(&self.db);
        let note = note.clone();

        task::spawn_blocking(move || -> DomainResult<Note> {
            let conn = db.get_connection()?;

            let affected = update_note(&conn, &note, now_ms())?;
            if affected == 0 {
                return Err(FieldLogError::NotFound(format!("note not found: {}", note.id)));
            }

            get_note(&conn, &note.id)?
                .ok_or_else(|| FieldLogError::NotFound(format!("note not found: {}", note.id)))
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
                .execute("DELETE FROM notes WHERE id = ?1", params![&id])
                .map_err(map_sql_error)?;
            if affected == 0 {
                return Err(FieldLogError::NotFound(format!("note not found: {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Note>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Note>> {
            let conn = db.get_connection()?;
            get_note(&conn, &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<Note>> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<Note>> {
            let conn = db.get_connection()?;

            let mut stmt = conn.prepare(SELECT_NOTES_FOR_USER).map_err(map_sql_error)?;
            let notes = stmt
                .query_map(params![&user_id], map_note_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(notes)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn clear_for_user(&self, user_id: &str) -> DomainResult<u64> {
        let db = Arc::clone(&self.db);
        let user_id = user_id.to_string();

        task::spawn_blocking(move || -> DomainResult<u64> {
            let conn = db.get_connection()?;

            let affected = conn
                .execute("DELETE FROM notes WHERE user_id = ?1", params![&user_id])
                .map_err(map_sql_error)?;
            Ok(affected as u64)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a Note
fn map_note_row(row: &Row) -> rusqlite::Result<Note> {
    let actions_raw: String = row.get(5)?;
    let revisit_raw: String = row.get(6)?;
    let study_raw: Option<String> = row.get(7)?;

    Ok(Note {
        id: row.get(0)?,
        date: row.get(2)?,
        hours: row.get(3)?,
        location_notes: row.get(4)?,
        actions: json_column(5, &actions_raw)?,
        revisit: json_column(6, &revisit_raw)?,
        study: study_raw.as_deref().map(|raw| json_column(7, raw)).transpose()?,
        user_id: row.get(1)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Insert a note
fn insert_note(conn: &Connection, note: &Note) -> DomainResult<()> {
    let actions = to_json(&note.actions)?;
    let revisit = to_json(&note.revisit)?;
    let study = note.study.as_ref().map(to_json).transpose()?;

    let params: [&dyn ToSql; 10] = [
        &note.id,
        &note.user_id,
        &note.date,
        &note.hours,
        &note.location_notes,
        &actions,
        &revisit,
        &study,
        &note.created_at,
        &note.updated_at,
    ];

    conn.execute(
        "INSERT INTO notes (
            id, user_id, date, hours, location_notes, actions, revisit, study,
            created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params.as_slice(),
    )
    .map_err(map_sql_error)?;

    Ok(())
}

/// Update a note, refreshing `updated_at` and leaving `created_at` alone.
/// Returns the number of affected rows.
fn update_note(conn: &Connection, note: &Note, now: i64) -> DomainResult<usize> {
    let actions = to_json(&note.actions)?;
    let revisit = to_json(&note.revisit)?;
    let study = note.study.as_ref().map(to_json).transpose()?;

    let params: [&dyn ToSql; 9] = [
        &note.user_id,
        &note.date,
        &note.hours,
        &note.location_notes,
        &actions,
        &revisit,
        &study,
        &now,
        &note.id, // WHERE clause
    ];

    conn.execute(
        "UPDATE notes SET
            user_id = ?1, date = ?2, hours = ?3, location_notes = ?4,
            actions = ?5, revisit = ?6, study = ?7, updated_at = ?8
         WHERE id = ?9",
        params.as_slice(),
    )
    .map_err(map_sql_error)
}

/// Fetch a note by id
fn get_note(conn: &Connection, id: &str) -> DomainResult<Option<Note>> {
    let result = conn.query_row(SELECT_NOTE, params![&id], map_note_row);

    match result {
        Ok(note) => Ok(Some(note)),
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
// JSON Column Handling
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

// =============================================================================
// Tests
// =============================================================================

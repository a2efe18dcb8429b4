//! Note service - orchestrates validation and persistence
//!
//! Bound to the acting user: creation stamps ownership, listings and bulk
//! deletion are always scoped to that user.

use std::sync::Arc;

use fieldlog_domain::types::Note;
use fieldlog_domain::{FieldLogError, Result};

use super::draft::{validate_draft, NoteDraft};
use super::ports::NoteRepository;

/// Note service for one acting user.
pub struct NoteService {
    repository: Arc<dyn NoteRepository>,
    user_id: String,
}

impl NoteService {
    /// Create a new note service scoped to `user_id`.
    pub fn new(repository: Arc<dyn NoteRepository>, user_id: impl Into<String>) -> Self {
        Self { repository, user_id: user_id.into() }
    }

    /// Validate a draft and persist the resulting note.
    ///
    /// The note gets a fresh id from validation and the acting user as its
    /// owner. Validation failures surface as `InvalidInput` carrying every
    /// offending field.
    pub async fn create(&self, draft: &NoteDraft) -> Result<Note> {
        let mut note =
            validate_draft(draft).map_err(|err| FieldLogError::InvalidInput(err.to_string()))?;
        note.user_id = Some(self.user_id.clone());

        self.repository.save(&note).await
    }

    /// Replace an existing note.
    pub async fn update(&self, note: &Note) -> Result<Note> {
        self.repository.update(note).await
    }

    /// Delete a note by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await
    }

    /// Look a note up by id.
    pub async fn find(&self, id: &str) -> Result<Option<Note>> {
        self.repository.find_by_id(id).await
    }

    /// All of the acting user's notes, newest first.
    pub async fn list(&self) -> Result<Vec<Note>> {
        self.repository.list_for_user(&self.user_id).await
    }

    /// The acting user's notes for one `yyyy-mm` month.
    ///
    /// Bucketing is the string prefix rule used everywhere: the note's ISO
    /// date must start with the month key, no timezone conversion.
    pub async fn list_for_month(&self, month: &str) -> Result<Vec<Note>> {
        let mut notes = self.repository.list_for_user(&self.user_id).await?;
        notes.retain(|note| note.date.get(0..7) == Some(month));
        Ok(notes)
    }

    /// Delete every note of the acting user, returning how many went.
    pub async fn clear(&self) -> Result<u64> {
        self.repository.clear_for_user(&self.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;

    /// In-memory repository mirroring the ordering contract of the real one.
    #[derive(Default)]
    struct MemoryNotes {
        rows: Mutex<Vec<Note>>,
    }

    #[async_trait]
    impl NoteRepository for MemoryNotes {
        async fn save(&self, note: &Note) -> Result<Note> {
            let mut stored = note.clone();
            stored.created_at = Some(1_700_000_000_000);
            stored.updated_at = stored.created_at;
            self.rows.lock().push(stored.clone());
            Ok(stored)
        }

        async fn update(&self, note: &Note) -> Result<Note> {
            let mut rows = self.rows.lock();
            let row = rows
                .iter_mut()
                .find(|row| row.id == note.id)
                .ok_or_else(|| FieldLogError::NotFound(format!("note {}", note.id)))?;
            *row = note.clone();
            row.updated_at = Some(1_700_000_001_000);
            Ok(row.clone())
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.rows.lock().retain(|row| row.id != id);
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Note>> {
            Ok(self.rows.lock().iter().find(|row| row.id == id).cloned())
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<Note>> {
            let mut rows: Vec<Note> = self
                .rows
                .lock()
                .iter()
                .filter(|row| row.user_id.as_deref() == Some(user_id))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
            Ok(rows)
        }

        async fn clear_for_user(&self, user_id: &str) -> Result<u64> {
            let mut rows = self.rows.lock();
            let before = rows.len();
            rows.retain(|row| row.user_id.as_deref() != Some(user_id));
            Ok((before - rows.len()) as u64)
        }
    }

    fn draft(date: &str, hours: &str) -> NoteDraft {
        NoteDraft { date_iso: date.into(), hours_hhmm: hours.into(), ..NoteDraft::default() }
    }

    #[tokio::test]
    async fn create_assigns_owner_and_unique_ids() {
        let repo = Arc::new(MemoryNotes::default());
        let service = NoteService::new(repo, "local");

        let first = service.create(&draft("2025-03-07", "02:30")).await.unwrap();
        let second = service.create(&draft("2025-03-08", "01:00")).await.unwrap();

        assert_eq!(first.user_id.as_deref(), Some("local"));
        assert_ne!(first.id, second.id);
        assert!(first.created_at.is_some());
    }

    #[tokio::test]
    async fn create_rejects_invalid_drafts_with_every_field() {
        let repo = Arc::new(MemoryNotes::default());
        let service = NoteService::new(repo.clone(), "local");

        let err = service.create(&NoteDraft::default()).await.unwrap_err();
        match err {
            FieldLogError::InvalidInput(message) => {
                assert!(message.contains("Informe a data."));
                assert!(message.contains("Informe as horas."));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert!(repo.rows.lock().is_empty());
    }

    #[tokio::test]
    async fn list_for_month_keeps_only_prefix_matches() {
        let repo = Arc::new(MemoryNotes::default());
        let service = NoteService::new(repo, "local");

        service.create(&draft("2025-03-07", "02:00")).await.unwrap();
        service.create(&draft("2025-03-21", "01:00")).await.unwrap();
        service.create(&draft("2025-04-01", "03:00")).await.unwrap();

        let march = service.list_for_month("2025-03").await.unwrap();
        assert_eq!(march.len(), 2);
        assert!(march.iter().all(|note| note.date.starts_with("2025-03-")));
    }

    #[tokio::test]
    async fn clear_reports_how_many_notes_went() {
        let repo = Arc::new(MemoryNotes::default());
        let service = NoteService::new(repo, "local");

        service.create(&draft("2025-03-07", "02:00")).await.unwrap();
        service.create(&draft("2025-03-08", "01:00")).await.unwrap();

        assert_eq!(service.clear().await.unwrap(), 2);
        assert!(service.list().await.unwrap().is_empty());
    }
}

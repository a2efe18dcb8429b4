//! Port interfaces for note persistence
//!
//! These traits define the boundary between note business logic and the
//! storage backend.

use async_trait::async_trait;
use fieldlog_domain::types::Note;
use fieldlog_domain::Result;

/// Trait for persisting notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, stamping `created_at`/`updated_at`. Returns the
    /// stored note.
    async fn save(&self, note: &Note) -> Result<Note>;

    /// Replace an existing note, refreshing `updated_at` and keeping
    /// `created_at`. Returns the stored note.
    async fn update(&self, note: &Note) -> Result<Note>;

    /// Delete a note by id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Look a note up by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Note>>;

    /// All notes for a user, newest first (date desc, then created_at desc).
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Note>>;

    /// Delete every note for a user, returning how many went.
    async fn clear_for_user(&self, user_id: &str) -> Result<u64>;
}

//! Port interfaces for user profile persistence
//!
//! These traits define the boundary between core business logic and the
//! profile storage. The export flow reads the profile to prefill the
//! participant name on the form.

use async_trait::async_trait;
use fieldlog_domain::types::UserProfile;
use fieldlog_domain::Result;

/// Trait for user profile persistence and retrieval.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Get a profile by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>>;

    /// Insert or replace a profile, stamping `created_at` on first write
    /// and refreshing `updated_at` on every write. Returns the stored
    /// profile.
    async fn upsert(&self, profile: &UserProfile) -> Result<UserProfile>;

    /// Delete a profile by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

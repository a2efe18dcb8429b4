//! User profile types
//!
//! Profile stored in the local database. Account and credential flows live
//! outside this codebase; everything here only needs an owner id and the
//! display fields the export form prefills.

use serde::{Deserialize, Serialize};

/// Locally stored user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, rename = "nomeCompleto", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, rename = "congregacao", skip_serializing_if = "Option::is_none")]
    pub congregation: Option<String>,
    #[serde(default, rename = "cidade", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, rename = "estado", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ISO `yyyy-mm-dd`.
    #[serde(default, rename = "dataNascimento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

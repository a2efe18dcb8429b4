//! Field-service note types
//!
//! A note is the atomic unit of work-time entry: one activity record for
//! one calendar day, carrying decimal hours, action tags and optional
//! follow-up sub-records. Wire names keep the original dataset's
//! camelCase/Portuguese keys so existing exports stay readable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One field-service activity record for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    /// ISO `yyyy-mm-dd`; doubles as the month-bucketing key.
    pub date: String,
    /// Decimal hours in `[0, 24]`, two decimals at rest.
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_notes: Option<String>,
    /// Tags from [`crate::constants::ALL_ACTIONS`]; order reflects entry
    /// sequence only.
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default, rename = "revisita")]
    pub revisit: RevisitField,
    #[serde(default, rename = "estudo", skip_serializing_if = "Option::is_none")]
    pub study: Option<StudyField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Epoch ms, stamped by the persistence layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Note {
    /// True when the study sub-record is present and enabled.
    pub fn study_enabled(&self) -> bool {
        self.study.as_ref().is_some_and(StudyField::is_enabled)
    }
}

/// Read-time classification of a note. Study wins over revisit when both
/// sub-records are structurally enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    Study,
    Revisit,
    Other,
}

/// Revisit sub-record as stored: the tagged object shape, or a bare
/// boolean in legacy rows. Read it through [`RevisitField::is_enabled`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RevisitField {
    Flag(bool),
    Record(RevisitRecord),
}

impl RevisitField {
    /// Normalization seam for the legacy boolean shape.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Flag(enabled) => *enabled,
            Self::Record(record) => record.enabled,
        }
    }

    /// Detail record, when this is not a legacy flag.
    pub fn record(&self) -> Option<&RevisitRecord> {
        match self {
            Self::Flag(_) => None,
            Self::Record(record) => Some(record),
        }
    }

    pub fn disabled() -> Self {
        Self::Record(RevisitRecord::default())
    }
}

impl Default for RevisitField {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Study sub-record, same dual shape as [`RevisitField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudyField {
    Flag(bool),
    Record(StudyRecord),
}

impl StudyField {
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Flag(enabled) => *enabled,
            Self::Record(record) => record.enabled,
        }
    }

    pub fn record(&self) -> Option<&StudyRecord> {
        match self {
            Self::Flag(_) => None,
            Self::Record(record) => Some(record),
        }
    }

    pub fn disabled() -> Self {
        Self::Record(StudyRecord::default())
    }
}

impl Default for StudyField {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Tagged revisit details. Fields beyond `enabled` are only meaningful
/// when `enabled` is true; absent optionals are omitted from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisitRecord {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "numeroCasa", skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    /// ISO date of the scheduled return visit.
    #[serde(default, rename = "data", skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>,
    /// `HH:mm`.
    #[serde(default, rename = "horario", skip_serializing_if = "Option::is_none")]
    pub visit_time: Option<String>,
    #[serde(default, rename = "celular", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Tagged study details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyRecord {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "numeroCasa", skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    /// Weekday or date the study happens on.
    #[serde(default, rename = "dia", skip_serializing_if = "Option::is_none")]
    pub study_day: Option<String>,
    /// `HH:mm`.
    #[serde(default, rename = "horario", skip_serializing_if = "Option::is_none")]
    pub study_time: Option<String>,
    #[serde(default, rename = "celular", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

/// New note id. UUIDv7 keeps ids roughly creation-ordered.
pub fn new_note_id() -> String {
    Uuid::now_v7().to_string()
}

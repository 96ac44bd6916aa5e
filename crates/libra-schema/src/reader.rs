//! Reading progress, bookmarks, annotations and reader preferences.

use std::collections::BTreeMap;

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::Model;

/// Reader chrome mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReadingMode {
    #[default]
    Normal,
    Zen,
}

/// Color theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    Sepia,
    HighContrast,
}

/// Text density preset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TypographyProfile {
    Compact,
    #[default]
    Comfortable,
    Large,
}

/// Last known reading position of a user within an ebook.
///
/// `row_version` increases on every write and is used for optimistic
/// concurrency during sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    pub user_id: Uuid,
    pub ebook_id: Uuid,
    /// Format-specific locator, e.g. an EPUB CFI or a page number.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress_percent: Option<f64>,
    pub reading_mode: ReadingMode,
    pub row_version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_read_at: Option<Timestamp>,
    #[serde(flatten)]
    pub model: Model,
}

/// Payload for recording reading progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreReadingProgress {
    pub ebook_id: Uuid,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress_percent: Option<f64>,
    pub reading_mode: ReadingMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_read_at: Option<Timestamp>,
}

/// Payload for moving reading progress.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReadingProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_mode: Option<ReadingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_read_at: Option<Timestamp>,
}

/// Saved location within an ebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub user_id: Uuid,
    pub ebook_id: Uuid,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub row_version: i64,
    #[serde(flatten)]
    pub model: Model,
}

/// Payload for creating a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreBookmark {
    pub ebook_id: Uuid,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Payload for relabeling a bookmark.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UpdateBookmark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Highlighted range with an optional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub user_id: Uuid,
    pub ebook_id: Uuid,
    pub location_start: String,
    pub location_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub row_version: i64,
    #[serde(flatten)]
    pub model: Model,
}

/// Payload for creating an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreAnnotation {
    pub ebook_id: Uuid,
    #[validate(length(min = 1))]
    pub location_start: String,
    #[validate(length(min = 1))]
    pub location_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload for editing an annotation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub location_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub location_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Per-user reader settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub user_id: Uuid,
    pub reading_mode: ReadingMode,
    pub zen_restore_on_open: bool,
    pub theme_mode: ThemeMode,
    /// Theme token overrides keyed by token name.
    pub theme_overrides: BTreeMap<String, String>,
    pub typography_profile: TypographyProfile,
    pub row_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of reader settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_mode: Option<ReadingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zen_restore_on_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_mode: Option<ThemeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_overrides: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography_profile: Option<TypographyProfile>,
}

impl UpdateUserPreferences {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// What the user had open most recently, restored across devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserReaderState {
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_ebook_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    pub reading_mode: ReadingMode,
    pub row_version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of the reader state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReaderState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_ebook_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_mode: Option<ReadingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_at: Option<Timestamp>,
}

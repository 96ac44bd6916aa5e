//! Ebook library schemas.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::Model;

/// File format of an imported ebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EbookFormat {
    Epub,
    Pdf,
    Txt,
}

/// Ebook owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Ebook {
    pub owner_user_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub format: EbookFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Object storage key of the uploaded file.
    pub storage_key: String,
    pub file_size_bytes: i64,
    /// Hex-encoded SHA-256 digest of the file contents.
    pub checksum_sha256: String,
    pub imported_at: Timestamp,
    #[serde(flatten)]
    pub model: Model,
}

/// Payload for importing an ebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreEbook {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub format: EbookFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 16))]
    pub language_code: Option<String>,
    #[validate(length(min = 1))]
    pub storage_key: String,
    #[validate(range(min = 1))]
    pub file_size_bytes: i64,
    #[validate(length(equal = 64))]
    pub checksum_sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<Timestamp>,
}

/// Payload for editing ebook details.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEbook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 16))]
    pub language_code: Option<String>,
}

/// Google Books metadata attached to an ebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EbookGoogleMetadata {
    pub ebook_id: Uuid,
    pub google_books_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub info_link: Option<String>,
    /// Volume payload as returned by the Google Books API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<Map<String, Value>>,
    pub attached_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// Payload for attaching Google Books metadata.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttachGoogleMetadata {
    #[validate(length(min = 1))]
    pub google_books_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 10))]
    pub isbn10: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 13))]
    pub isbn13: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub page_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub info_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn store_ebook() -> StoreEbook {
        StoreEbook {
            title: "Dune".into(),
            description: None,
            format: EbookFormat::Epub,
            language_code: Some("en".into()),
            storage_key: "ebooks/dune.epub".into(),
            file_size_bytes: 1024,
            checksum_sha256: "a".repeat(64),
            imported_at: None,
        }
    }

    #[test]
    fn store_ebook_is_valid() {
        assert!(store_ebook().validate().is_ok());
    }

    #[test]
    fn store_ebook_rejects_bad_checksum_and_size() {
        let ebook = StoreEbook {
            checksum_sha256: "abc".into(),
            file_size_bytes: 0,
            ..store_ebook()
        };
        let errors = ebook.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("checksum_sha256"));
        assert!(fields.contains_key("file_size_bytes"));
    }

    #[test]
    fn format_is_closed() {
        assert_eq!(serde_json::to_value(EbookFormat::Pdf).unwrap(), json!("pdf"));
        assert!(serde_json::from_value::<EbookFormat>(json!("mobi")).is_err());
        assert_eq!("txt".parse::<EbookFormat>().unwrap(), EbookFormat::Txt);
    }

    #[test]
    fn update_ebook_allows_empty_patch() {
        let update: UpdateEbook = serde_json::from_value(json!({})).unwrap();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn attach_metadata_checks_isbn_lengths() {
        let attach = AttachGoogleMetadata {
            google_books_id: "zyTCAlFPjgYC".into(),
            isbn10: Some("123".into()),
            thumbnail_url: Some("https://books.google.com/thumb.jpg".into()),
            ..Default::default()
        };
        let errors = attach.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("isbn10"));
        assert!(!errors.field_errors().contains_key("thumbnail_url"));
    }
}

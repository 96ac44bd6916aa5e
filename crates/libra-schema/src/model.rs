//! Shared building blocks for entity and request schemas.

use std::borrow::Cow;

use jiff::Timestamp;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Base shape shared by persisted entities.
///
/// `deleted_at` is set on soft-delete and cleared on restore; a record is only
/// physically removed through the separate kill operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Timestamp when the record was created.
    pub created_at: Timestamp,
    /// Timestamp of the latest mutation.
    pub updated_at: Timestamp,
    /// Timestamp of the soft-delete, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl Model {
    /// Creates a fresh record with `created_at == updated_at`.
    pub fn new(id: Uuid, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            updated_at: created_at,
            deleted_at: None,
        }
    }

    /// Returns true if the record has been soft-deleted.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// Query accepted by list endpoints.
///
/// Numeric fields accept either JSON numbers or numeric strings, since they
/// usually arrive as URL query parameters.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GetManyQuery {
    /// Maximum number of records to return.
    #[serde(default, deserialize_with = "coerce_u32")]
    #[schemars(with = "Option<u32>")]
    pub limit: Option<u32>,
    /// Number of records to skip.
    #[serde(default, deserialize_with = "coerce_u32")]
    #[schemars(with = "Option<u32>")]
    pub offset: Option<u32>,
    /// Comma-separated relations to preload.
    #[serde(default)]
    pub preloads: Option<String>,
    /// Field to order by.
    #[serde(default)]
    pub order_by: Option<String>,
    /// Sort direction.
    #[serde(default)]
    pub order_direction: Option<OrderDirection>,
}

impl GetManyQuery {
    /// Default page size.
    pub const DEFAULT_LIMIT: u32 = 20;
    /// Default offset.
    pub const DEFAULT_OFFSET: u32 = 0;

    /// Returns the query with the given limit.
    #[inline]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the query with the given offset.
    #[inline]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns the effective limit.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    /// Returns the effective offset.
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(Self::DEFAULT_OFFSET)
    }

    /// Returns the requested preloads, split on commas.
    pub fn preloads(&self) -> Vec<&str> {
        split_preloads(self.preloads.as_deref())
    }
}

/// Query carrying only relation preloads.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct PreloadsQuery {
    /// Comma-separated relations to preload.
    #[serde(default)]
    pub preloads: Option<String>,
}

impl PreloadsQuery {
    /// Returns the requested preloads, split on commas.
    pub fn preloads(&self) -> Vec<&str> {
        split_preloads(self.preloads.as_deref())
    }
}

/// Path parameters of routes addressing one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct IdParams {
    /// Unique identifier of the record.
    pub id: Uuid,
}

/// Strict empty object.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Empty {}

impl Validate for Empty {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Discriminator carried by [`FileUpload`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    File,
}

/// Marker for a file upload field.
///
/// JSON schema has no binary type, so the marker is described as an object
/// with a literal `type: "file"` property. Document emission rewrites that
/// exact shape into the OpenAPI binary string format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl FileUpload {
    /// Returns the marker schema as emitted in generated documents.
    pub fn marker_schema() -> Schema {
        json_schema!({
            "type": "object",
            "properties": {
                "type": { "type": "string", "enum": ["file"] },
            },
            "required": ["type"],
        })
    }
}

impl JsonSchema for FileUpload {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("FileUpload")
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        Self::marker_schema()
    }
}

impl Validate for FileUpload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

fn split_preloads(preloads: Option<&str>) -> Vec<&str> {
    preloads
        .map(|preloads| {
            preloads
                .split(',')
                .map(str::trim)
                .filter(|preload| !preload.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Accepts a JSON number or a numeric string.
fn coerce_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            let message = format!("expected a non-negative integer, got `{text}`");
            serde::de::Error::custom(message)
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn model_tracks_soft_delete() {
        let value = json!({
            "id": "0b5b3c2e-6a1f-4d8e-9c1a-2f4b7d9e0a11",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z",
        });
        let mut model: Model = serde_json::from_value(value).unwrap();
        assert!(!model.is_deleted());

        model.deleted_at = Some(model.updated_at);
        assert!(model.is_deleted());
        assert!(serde_json::to_value(&model).unwrap().get("deletedAt").is_some());
    }

    #[test]
    fn model_rejects_malformed_id() {
        let value = json!({
            "id": "not-a-uuid",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z",
        });
        assert!(serde_json::from_value::<Model>(value).is_err());
    }

    #[test]
    fn get_many_query_coerces_numeric_strings() {
        let query: GetManyQuery = serde_json::from_value(json!({
            "limit": "15",
            "offset": 30,
            "orderBy": "title",
            "orderDirection": "desc",
        }))
        .unwrap();

        assert_eq!(query.limit(), 15);
        assert_eq!(query.offset(), 30);
        assert_eq!(query.order_direction, Some(OrderDirection::Desc));

        assert!(serde_json::from_value::<GetManyQuery>(json!({ "limit": "-1" })).is_err());
        assert!(serde_json::from_value::<GetManyQuery>(json!({ "orderDirection": "up" })).is_err());
    }

    #[test]
    fn get_many_query_defaults() {
        let query: GetManyQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.limit(), GetManyQuery::DEFAULT_LIMIT);
        assert_eq!(query.offset(), 0);
        assert!(query.preloads().is_empty());
    }

    #[test]
    fn preloads_are_split() {
        let query = PreloadsQuery {
            preloads: Some("owner, shares,,".into()),
        };
        assert_eq!(query.preloads(), vec!["owner", "shares"]);
    }

    #[test]
    fn empty_is_strict() {
        assert!(serde_json::from_value::<Empty>(json!({})).is_ok());
        assert!(serde_json::from_value::<Empty>(json!({ "extra": 1 })).is_err());
    }

    #[test]
    fn file_upload_marker_shape() {
        let upload: FileUpload = serde_json::from_value(json!({ "type": "file" })).unwrap();
        assert_eq!(upload.kind, FileKind::File);
        assert_eq!(
            serde_json::to_value(FileUpload::marker_schema()).unwrap(),
            json!({
                "type": "object",
                "properties": { "type": { "type": "string", "enum": ["file"] } },
                "required": ["type"],
            })
        );
    }
}

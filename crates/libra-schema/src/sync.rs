//! Offline sync event log.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::GetManyQuery;

/// Kind of reader entity a sync event mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SyncEntityType {
    Progress,
    Annotation,
    Bookmark,
    Preference,
    ReaderState,
}

/// Mutation carried by a sync event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncOperation {
    Upsert,
    Delete,
}

/// Recorded client mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entity_type: SyncEntityType,
    pub entity_id: Uuid,
    pub operation: SyncOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
    /// Row version the client based its change on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_version: Option<i64>,
    pub client_timestamp: Timestamp,
    pub server_timestamp: Timestamp,
    pub idempotency_key: String,
    pub created_at: Timestamp,
}

/// Payload for pushing a client mutation.
///
/// Events sharing an `idempotency_key` are recorded once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreSyncEvent {
    pub entity_type: SyncEntityType,
    pub entity_id: Uuid,
    pub operation: SyncOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<Timestamp>,
    #[validate(length(min = 8))]
    pub idempotency_key: String,
}

/// List query for sync events, optionally limited to events after `since`.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct SyncEventsQuery {
    #[serde(flatten)]
    pub page: GetManyQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn store_event_requires_idempotency_key() {
        let event: StoreSyncEvent = serde_json::from_value(json!({
            "entityType": "reader_state",
            "entityId": "6f9619ff-8b86-4d11-b42d-00c04fc964ff",
            "operation": "upsert",
            "idempotencyKey": "short",
        }))
        .unwrap();

        assert_eq!(event.entity_type, SyncEntityType::ReaderState);
        let errors = event.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("idempotency_key"));
    }

    #[test]
    fn events_query_extends_pagination() {
        let query: SyncEventsQuery = serde_json::from_value(json!({
            "limit": "50",
            "since": "2025-02-01T00:00:00Z",
        }))
        .unwrap();

        assert_eq!(query.page.limit(), 50);
        assert_eq!(query.page.offset(), 0);
        assert!(query.since.is_some());
    }

    #[test]
    fn events_query_rejects_bad_since() {
        let value = json!({ "since": "yesterday" });
        assert!(serde_json::from_value::<SyncEventsQuery>(value).is_err());
    }
}

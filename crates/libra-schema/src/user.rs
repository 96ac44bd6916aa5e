//! User account schemas.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Model;

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<Timestamp>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(flatten)]
    pub model: Model,
}

impl User {
    /// Returns true once the email address has been confirmed.
    #[inline]
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StoreUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Payload for updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user_json() -> serde_json::Value {
        json!({
            "id": "5c1e0a9e-36a4-4c43-9d0b-7a2b9f1e4a10",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z",
            "email": "jane@example.com",
            "username": "jane",
        })
    }

    #[test]
    fn user_defaults_admin_flag() {
        let user: User = serde_json::from_value(user_json()).unwrap();
        assert!(!user.is_admin);
        assert!(!user.is_verified());
        assert!(user.validate().is_ok());
    }

    #[test]
    fn user_serializes_model_fields_flat() {
        let user: User = serde_json::from_value(user_json()).unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], "5c1e0a9e-36a4-4c43-9d0b-7a2b9f1e4a10");
        assert_eq!(value["isAdmin"], false);
        assert!(value.get("model").is_none());
    }

    #[test]
    fn user_rejects_short_username() {
        let mut value = user_json();
        value["username"] = json!("jo");
        let user: User = serde_json::from_value(value).unwrap();
        let errors = user.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn store_user_requires_strong_password() {
        let store = StoreUser {
            email: "jane@example.com".into(),
            username: "jane".into(),
            google_id: None,
            password: "short".into(),
        };
        let errors = store.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn update_user_rejects_invalid_email() {
        let update = UpdateUser {
            email: "not-an-email".into(),
            username: "jane".into(),
        };
        assert!(update.validate().is_err());
    }
}

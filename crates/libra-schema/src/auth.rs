//! Authentication payloads and results.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::user::User;

/// Authenticated user returned by login-like routes.
pub type AuthResult = User;

/// User returned after a successful email verification.
pub type VerifyEmailResponse = User;

/// Issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub token: String,
    pub expires_at: Timestamp,
}

impl AuthToken {
    /// Returns true if the token has expired at `now`.
    #[inline]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct AuthRegister {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Login payload. `identifier` is either an email or a username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct AuthLogin {
    pub identifier: String,
    pub password: String,
}

/// Query received on the Google OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct GoogleCallbackQuery {
    pub code: String,
    pub state: String,
}

/// Device authorization flow handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoogleDeviceStart {
    pub device_code: String,
    #[validate(url)]
    pub auth_url: String,
    pub expires_at: Timestamp,
    #[validate(range(min = 1))]
    pub interval_seconds: u32,
}

/// Device authorization poll payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoogleDevicePoll {
    #[validate(length(min = 16))]
    pub device_code: String,
}

/// Session material returned once a login completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthResultEnvelope {
    #[validate(nested)]
    pub user: User,
    #[validate(nested)]
    pub token: AuthToken,
    #[validate(nested)]
    pub refresh_token: AuthToken,
}

/// State of a pending device authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DevicePollStatus {
    Pending,
    Approved,
    Expired,
    Failed,
}

/// Device authorization poll result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct GoogleDevicePollResponse {
    pub status: DevicePollStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub result: Option<AuthResultEnvelope>,
}

/// Email verification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct VerifyEmail {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, max = 10))]
    pub code: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn device_start_requires_url_and_interval() {
        let start: GoogleDeviceStart = serde_json::from_value(json!({
            "deviceCode": "abc",
            "authUrl": "not a url",
            "expiresAt": "2025-01-01T00:10:00Z",
            "intervalSeconds": 0,
        }))
        .unwrap();

        let errors = start.validate().unwrap_err();
        let mut codes: Vec<_> = errors
            .field_errors()
            .into_values()
            .flatten()
            .map(|error| error.code.as_ref())
            .collect();
        codes.sort_unstable();
        assert_eq!(codes, ["range", "url"]);
    }

    #[test]
    fn device_poll_requires_long_code() {
        let poll = GoogleDevicePoll {
            device_code: "short".into(),
        };
        assert!(poll.validate().is_err());

        let poll = GoogleDevicePoll {
            device_code: "0123456789abcdef".into(),
        };
        assert!(poll.validate().is_ok());
    }

    #[test]
    fn poll_response_status_values() {
        let pending: GoogleDevicePollResponse =
            serde_json::from_value(json!({ "status": "pending" })).unwrap();
        assert_eq!(pending.status, DevicePollStatus::Pending);
        assert!(pending.result.is_none());

        let value = json!({ "status": "unknown" });
        assert!(serde_json::from_value::<GoogleDevicePollResponse>(value).is_err());
    }

    #[test]
    fn verify_email_code_length() {
        let verify = VerifyEmail {
            email: "jane@example.com".into(),
            code: "123".into(),
        };
        assert!(verify.validate().is_err());
    }

    #[test]
    fn token_expiry() {
        let token = AuthToken {
            token: "t".into(),
            expires_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        };
        assert!(token.is_expired_at("2025-01-01T00:00:00Z".parse().unwrap()));
        assert!(!token.is_expired_at("2024-12-31T23:59:59Z".parse().unwrap()));
    }
}

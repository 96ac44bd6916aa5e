//! Declared security requirements.
//!
//! The contract layer only documents which credentials a route expects;
//! enforcement belongs to the server's authentication middleware.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name of the HTTP bearer (JWT) security scheme.
pub const BEARER_AUTH: &str = "bearerAuth";

/// Name of the `access_token` cookie security scheme.
pub const COOKIE_AUTH: &str = "cookieAuth";

/// One OpenAPI security requirement object: scheme name to required scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Which credentials a protected route accepts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecurityType {
    /// `Authorization: Bearer <jwt>` only.
    Bearer,
    /// `access_token` cookie only.
    Cookie,
    /// Either of the two.
    #[default]
    BearerOrCookie,
}

impl SecurityType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::Cookie => "cookie",
            Self::BearerOrCookie => "bearerOrCookie",
        }
    }

    /// Returns the alternative requirement objects; any one of them suffices.
    pub fn requirements(self) -> Vec<SecurityRequirement> {
        let scheme = |name: &str| SecurityRequirement::from([(name.to_owned(), Vec::new())]);

        match self {
            Self::Bearer => vec![scheme(BEARER_AUTH)],
            Self::Cookie => vec![scheme(COOKIE_AUTH)],
            Self::BearerOrCookie => vec![scheme(BEARER_AUTH), scheme(COOKIE_AUTH)],
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "bearer" => Ok(Self::Bearer),
            "cookie" => Ok(Self::Cookie),
            "bearerOrCookie" => Ok(Self::BearerOrCookie),
            other => Err(Error::invalid_security_type(other)),
        }
    }
}

/// Inputs to [`security_metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityOptions {
    /// Whether the route requires credentials at all.
    #[serde(default = "default_security")]
    pub security: bool,
    /// Accepted credentials when `security` is set.
    #[serde(default)]
    pub security_type: SecurityType,
}

fn default_security() -> bool {
    true
}

impl Default for SecurityOptions {
    fn default() -> Self {
        Self {
            security: default_security(),
            security_type: SecurityType::default(),
        }
    }
}

impl SecurityOptions {
    /// Options for a route that requires no credentials.
    pub fn public() -> Self {
        Self {
            security: false,
            ..Self::default()
        }
    }

    /// Options for a protected route accepting `security_type`.
    pub fn protected(security_type: SecurityType) -> Self {
        Self {
            security: true,
            security_type,
        }
    }
}

/// Auxiliary route metadata carrying the declared security requirement.
///
/// An absent requirement marks the route as public.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    open_api_security: Option<Vec<SecurityRequirement>>,
}

impl SecurityMetadata {
    /// Metadata of a public route.
    #[inline]
    pub fn public() -> Self {
        Self::default()
    }

    /// Returns true if no credentials are declared.
    #[inline]
    pub fn is_public(&self) -> bool {
        self.open_api_security.is_none()
    }

    /// Returns the declared requirement alternatives.
    #[inline]
    pub fn requirements(&self) -> Option<&[SecurityRequirement]> {
        self.open_api_security.as_deref()
    }
}

/// Derives route metadata from security options.
pub fn security_metadata(options: SecurityOptions) -> SecurityMetadata {
    let requirements = options.security_type.requirements();
    SecurityMetadata {
        open_api_security: options.security.then_some(requirements),
    }
}

/// Derives route metadata from an untyped security type name.
///
/// The name is checked even when `security` is false, so a misspelled type
/// never yields a silently public route.
pub fn parse_security_metadata(security: bool, security_type: &str) -> Result<SecurityMetadata> {
    let security_type = security_type.parse()?;
    Ok(security_metadata(SecurityOptions {
        security,
        security_type,
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    fn metadata_json(options: SecurityOptions) -> serde_json::Value {
        serde_json::to_value(security_metadata(options)).unwrap()
    }

    #[test]
    fn bearer_yields_single_requirement() {
        let value = metadata_json(SecurityOptions::protected(SecurityType::Bearer));
        assert_eq!(value, json!({ "openApiSecurity": [{ "bearerAuth": [] }] }));
    }

    #[test]
    fn cookie_yields_single_requirement() {
        let value = metadata_json(SecurityOptions::protected(SecurityType::Cookie));
        assert_eq!(value, json!({ "openApiSecurity": [{ "cookieAuth": [] }] }));
    }

    #[test]
    fn bearer_or_cookie_yields_alternatives() {
        let value = metadata_json(SecurityOptions::default());
        assert_eq!(
            value,
            json!({ "openApiSecurity": [{ "bearerAuth": [] }, { "cookieAuth": [] }] })
        );
    }

    #[test]
    fn public_route_has_no_security_field() {
        let metadata = security_metadata(SecurityOptions::public());
        assert!(metadata.is_public());
        assert_eq!(serde_json::to_value(&metadata).unwrap(), json!({}));
    }

    #[test]
    fn unknown_security_type_fails_fast() {
        let error = parse_security_metadata(true, "oauth").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidSecurityType);

        let error = parse_security_metadata(false, "oauth").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidSecurityType);

        let value = json!({ "securityType": "oauth" });
        assert!(serde_json::from_value::<SecurityOptions>(value).is_err());
    }

    #[test]
    fn parses_known_security_types() {
        let metadata = parse_security_metadata(true, "cookie").unwrap();
        let requirements = metadata.requirements().unwrap();
        assert_eq!(requirements.len(), 1);
        assert!(requirements[0].contains_key(COOKIE_AUTH));

        let all = [
            SecurityType::Bearer,
            SecurityType::Cookie,
            SecurityType::BearerOrCookie,
        ];
        for security_type in all {
            let parsed: SecurityType = security_type.as_str().parse().unwrap();
            assert_eq!(parsed, security_type);
        }
    }

    #[test]
    fn options_default_to_protected_either() {
        let options: SecurityOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options, SecurityOptions::default());
        assert!(options.security);
        assert_eq!(options.security_type, SecurityType::BearerOrCookie);
    }
}

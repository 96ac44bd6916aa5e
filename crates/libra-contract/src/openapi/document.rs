//! OpenAPI 3.0 document model.
//!
//! Only the subset of the object model the contract needs is represented.
//! Schemas are kept as raw JSON values produced by `schemars`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::security::{BEARER_AUTH, COOKIE_AUTH, SecurityRequirement};

/// OpenAPI version written to generated documents.
pub const OPENAPI_VERSION: &str = "3.0.2";

/// Media type of every request and response body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Root document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Operations keyed by templated path, then by lowercase method.
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
    pub components: Components,
}

impl OpenApiDocument {
    /// Returns the operation at `path` and `method`, e.g. `("/health", "get")`.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path)?.get(method)
    }

    /// Returns every operation in path and method order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.paths.values().flat_map(BTreeMap::values)
    }
}

/// Metadata about the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A server hosting the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    /// Creates a new server with the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A single API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    pub responses: BTreeMap<String, ResponseObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
}

/// A path or query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
}

/// JSON content of a request or response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Value,
}

/// Request body of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

impl RequestBody {
    /// Creates a required JSON body.
    pub fn json(schema: Value) -> Self {
        Self {
            description: None,
            required: true,
            content: BTreeMap::from([(JSON_MEDIA_TYPE.to_owned(), MediaType { schema })]),
        }
    }
}

/// Declared response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

impl ResponseObject {
    /// Creates a JSON response.
    pub fn json(description: impl Into<String>, schema: Value) -> Self {
        Self {
            description: description.into(),
            content: BTreeMap::from([(JSON_MEDIA_TYPE.to_owned(), MediaType { schema })]),
        }
    }

    /// Returns the JSON schema of the response, if any.
    pub fn json_schema(&self) -> Option<&Value> {
        self.content.get(JSON_MEDIA_TYPE).map(|media| &media.schema)
    }
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

/// Authentication scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    #[serde(rename = "http")]
    Http {
        scheme: String,
        #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
}

impl SecurityScheme {
    /// The `access_token` cookie scheme.
    pub fn access_token_cookie() -> Self {
        Self::ApiKey {
            name: "access_token".to_owned(),
            location: ApiKeyLocation::Cookie,
        }
    }

    /// The HTTP bearer scheme carrying a JWT.
    pub fn bearer_jwt() -> Self {
        Self::Http {
            scheme: "bearer".to_owned(),
            bearer_format: Some("JWT".to_owned()),
        }
    }
}

/// The security schemes referenced by route metadata.
pub fn security_schemes() -> BTreeMap<String, SecurityScheme> {
    BTreeMap::from([
        (COOKIE_AUTH.to_owned(), SecurityScheme::access_token_cookie()),
        (BEARER_AUTH.to_owned(), SecurityScheme::bearer_jwt()),
    ])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn security_schemes_wire_shape() {
        let value = serde_json::to_value(security_schemes()).unwrap();
        assert_eq!(
            value,
            json!({
                "cookieAuth": { "type": "apiKey", "name": "access_token", "in": "cookie" },
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" },
            })
        );
    }

    #[test]
    fn parameter_location_is_named_in() {
        let parameter = Parameter {
            name: "id".into(),
            location: ParameterLocation::Path,
            required: true,
            description: None,
            schema: json!({ "type": "string", "format": "uuid" }),
        };
        let value = serde_json::to_value(parameter).unwrap();
        assert_eq!(value["in"], "path");
        assert!(value.get("description").is_none());
    }
}

//! Route descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use libra_schema::{
    ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
};

use crate::schema::{ContractSchema, SchemaType};
use crate::security::SecurityMetadata;
use crate::{Error, Result};

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns the key used for the method in an OpenAPI path item.
    #[must_use]
    pub const fn openapi_key(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

/// The standard failure envelopes declared by protected routes.
pub fn fail_responses() -> [(u16, ContractSchema); 4] {
    [
        (401, ContractSchema::of::<UnauthorizedResponse>()),
        (403, ContractSchema::of::<ForbiddenResponse>()),
        (404, ContractSchema::of::<NotFoundResponse>()),
        (500, ContractSchema::of::<InternalServerErrorResponse>()),
    ]
}

/// Description of one API operation.
///
/// Paths use `:param` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    method: Method,
    path: String,
    summary: Option<String>,
    description: Option<String>,
    path_params: Option<ContractSchema>,
    query: Option<ContractSchema>,
    body: Option<ContractSchema>,
    responses: BTreeMap<u16, ContractSchema>,
    metadata: SecurityMetadata,
}

impl RouteDescriptor {
    /// Creates a route with no inputs, responses or security.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            description: None,
            path_params: None,
            query: None,
            body: None,
            responses: BTreeMap::new(),
            metadata: SecurityMetadata::public(),
        }
    }

    /// Shorthand for a `GET` route.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a `POST` route.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Shorthand for a `PUT` route.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Shorthand for a `PATCH` route.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// Shorthand for a `DELETE` route.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_path_params<T: SchemaType>(mut self) -> Self {
        self.path_params = Some(ContractSchema::of::<T>());
        self
    }

    pub fn with_query<T: SchemaType>(mut self) -> Self {
        self.query = Some(ContractSchema::of::<T>());
        self
    }

    pub fn with_body<T: SchemaType>(mut self) -> Self {
        self.body = Some(ContractSchema::of::<T>());
        self
    }

    /// Declares the schema returned with `STATUS`, replacing any previous one.
    pub fn response<const STATUS: u16, T: SchemaType>(mut self) -> Self {
        self.responses.insert(STATUS, ContractSchema::of::<T>());
        self
    }

    /// Merges in the 401/403/404/500 failure envelopes.
    ///
    /// Statuses already declared on the route keep their schema.
    pub fn with_fail_responses(mut self) -> Self {
        for (status, schema) in fail_responses() {
            self.responses.entry(status).or_insert(schema);
        }
        self
    }

    pub fn with_metadata(mut self, metadata: SecurityMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn path_params(&self) -> Option<&ContractSchema> {
        self.path_params.as_ref()
    }

    #[inline]
    pub fn query(&self) -> Option<&ContractSchema> {
        self.query.as_ref()
    }

    #[inline]
    pub fn body(&self) -> Option<&ContractSchema> {
        self.body.as_ref()
    }

    #[inline]
    pub fn responses(&self) -> &BTreeMap<u16, ContractSchema> {
        &self.responses
    }

    /// Returns the schema declared for `status`.
    #[inline]
    pub fn response_schema(&self, status: u16) -> Option<&ContractSchema> {
        self.responses.get(&status)
    }

    #[inline]
    pub fn metadata(&self) -> &SecurityMetadata {
        &self.metadata
    }

    /// Returns the path in OpenAPI template syntax: `/users/:id` becomes
    /// `/users/{id}`.
    pub fn openapi_path(&self) -> String {
        self.path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => format!("{{{name}}}"),
                None => segment.to_owned(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Returns the names of the `:param` placeholders, in path order.
    pub fn path_param_names(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .collect()
    }

    /// Validates a response payload against the schema declared for `status`.
    pub fn validate_response(&self, status: u16, value: Value) -> Result<()> {
        let schema = self.response_schema(status).ok_or_else(|| {
            Error::contract(format!(
                "status {status} is not declared for {} {}",
                self.method, self.path
            ))
        })?;
        Ok(schema.validate(value)?)
    }

    /// Validates a request body. Routes without a body schema accept any value.
    pub fn validate_body(&self, value: Value) -> Result<()> {
        validate_optional(self.body.as_ref(), value)
    }

    /// Validates query parameters. Routes without a query schema accept any value.
    pub fn validate_query(&self, value: Value) -> Result<()> {
        validate_optional(self.query.as_ref(), value)
    }

    /// Validates path parameters. Routes without a schema accept any value.
    pub fn validate_path_params(&self, value: Value) -> Result<()> {
        validate_optional(self.path_params.as_ref(), value)
    }
}

fn validate_optional(schema: Option<&ContractSchema>, value: Value) -> Result<()> {
    match schema {
        Some(schema) => Ok(schema.validate(value)?),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use libra_schema::user::User;
    use libra_schema::{DataResponse, Empty, IdParams, Response};
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    fn route() -> RouteDescriptor {
        RouteDescriptor::get("/api/v1/users/:id/sessions/:sessionId")
            .with_path_params::<IdParams>()
            .response::<200, DataResponse<User>>()
            .with_fail_responses()
    }

    #[test]
    fn method_wire_names() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
        assert_eq!(Method::Get.openapi_key(), "get");
    }

    #[test]
    fn converts_path_placeholders() {
        let route = route();
        assert_eq!(route.openapi_path(), "/api/v1/users/{id}/sessions/{sessionId}");
        assert_eq!(route.path_param_names(), vec!["id", "sessionId"]);
    }

    #[test]
    fn fail_responses_are_merged() {
        let statuses: Vec<u16> = route().responses().keys().copied().collect();
        assert_eq!(statuses, vec![200, 401, 403, 404, 500]);
    }

    #[test]
    fn declared_statuses_win_over_fail_set() {
        let route = RouteDescriptor::get("/")
            .response::<404, Response>()
            .with_fail_responses();
        assert!(route.response_schema(404).unwrap().is::<Response>());
    }

    #[test]
    fn later_response_replaces_earlier() {
        let route = RouteDescriptor::get("/")
            .response::<200, Response>()
            .response::<200, Empty>();
        assert!(route.response_schema(200).unwrap().is::<Empty>());
    }

    #[test]
    fn validates_declared_responses() {
        let route = route();
        let error = route
            .validate_response(404, json!({ "status": 404, "success": true }))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Schema);
        assert!(error.schema_error().unwrap().has_path(""));

        let error = route.validate_response(418, json!({})).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Contract);
    }

    #[test]
    fn validates_path_params() {
        let route = route();
        assert!(route.validate_path_params(json!({ "id": "not-a-uuid" })).is_err());
        assert!(
            route
                .validate_path_params(json!({ "id": "5c1e0a9e-36a4-4c43-9d0b-7a2b9f1e4a10" }))
                .is_ok()
        );
        assert!(route.validate_body(json!({ "anything": true })).is_ok());
    }
}

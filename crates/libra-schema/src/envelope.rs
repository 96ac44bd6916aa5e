//! Uniform response envelopes.
//!
//! Every API response, success or failure, is wrapped in [`Response`] or one
//! of its extensions. Domain schemas compose into these types rather than
//! defining their own top-level shapes.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::literal::{LiteralBool, LiteralStatus};

fn default_status() -> u16 {
    200
}

fn default_message() -> String {
    "Request processed successfully.".to_owned()
}

fn default_success() -> bool {
    true
}

fn default_paginated_message() -> String {
    "Fetched paginated data successfully!".to_owned()
}

fn unauthorized_message() -> String {
    "Sorry, you are not authorized to access this resource.".to_owned()
}

fn forbidden_message() -> String {
    "Sorry, you do not have permission to access this resource.".to_owned()
}

fn not_found_message() -> String {
    "The requested resource was not found.".to_owned()
}

fn internal_server_error_message() -> String {
    "Sorry, something went wrong on our end. Please try again later.".to_owned()
}

/// Plain response envelope.
///
/// All three fields carry defaults, so `{}` is a valid success response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code.
    #[serde(default = "default_status")]
    pub status: u16,
    /// Human-readable outcome message.
    #[serde(default = "default_message")]
    pub message: String,
    /// Whether the request succeeded.
    #[serde(default = "default_success")]
    pub success: bool,
}

impl Response {
    /// Creates a new envelope.
    pub fn new(status: u16, message: impl Into<String>, success: bool) -> Self {
        Self {
            status,
            message: message.into(),
            success,
        }
    }

    /// Returns the envelope with its message replaced.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: default_status(),
            message: default_message(),
            success: default_success(),
        }
    }
}

/// Response envelope carrying a single entity.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}Response")]
pub struct DataResponse<T> {
    /// The response payload.
    pub data: T,
    #[serde(flatten)]
    pub envelope: Response,
}

impl<T> DataResponse<T> {
    /// Wraps `data` in a default success envelope.
    pub fn new(data: T) -> Self {
        Self {
            data,
            envelope: Response::default(),
        }
    }

    /// Returns the envelope with its status code replaced.
    pub fn with_status(mut self, status: u16) -> Self {
        self.envelope.status = status;
        self
    }

    /// Returns the envelope with its message replaced.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message = message.into();
        self
    }
}

impl<T: Validate> Validate for DataResponse<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let Err(inner) = self.data.validate() else {
            return Ok(());
        };

        let mut errors = ValidationErrors::new();
        errors
            .errors_mut()
            .insert("data".into(), ValidationErrorsKind::Struct(Box::new(inner)));
        Err(errors)
    }
}

/// Paginated response envelope.
///
/// The status is pinned to `200`: pagination responses never represent
/// failures.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "Paginated{T}Response")]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// HTTP status code, always `200`.
    pub status: LiteralStatus<200>,
    /// Human-readable outcome message.
    #[serde(default = "default_paginated_message")]
    pub message: String,
    /// Whether the request succeeded.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Number of items across all pages.
    pub total: u64,
    /// Current page number, starting at 1.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Number of pages, `ceil(total / limit)`.
    pub total_pages: u64,
    /// Items in this page.
    pub data: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Creates a page from an offset/limit window over `total` items.
    ///
    /// A zero `limit` is treated as a single page holding every item.
    pub fn new(
        message: impl Into<String>,
        data: Vec<T>,
        total: u64,
        limit: u64,
        offset: u64,
    ) -> Self {
        let (page, total_pages) = match limit {
            0 => (1, u64::from(total > 0)),
            limit => (offset / limit + 1, total.div_ceil(limit)),
        };

        Self {
            status: LiteralStatus,
            message: message.into(),
            success: true,
            total,
            page,
            limit,
            total_pages,
            data,
        }
    }

    /// Returns true if pages exist after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T: Validate> Validate for PaginatedResponse<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let items: BTreeMap<usize, Box<ValidationErrors>> = self
            .data
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.validate().err().map(|err| (index, Box::new(err))))
            .collect();

        if items.is_empty() {
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        errors
            .errors_mut()
            .insert("data".into(), ValidationErrorsKind::List(items));
        Err(errors)
    }
}

/// Failure envelope for `401 Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UnauthorizedResponse {
    /// Always `401`.
    pub status: LiteralStatus<401>,
    /// Human-readable failure message.
    #[serde(default = "unauthorized_message")]
    pub message: String,
    /// Always `false`.
    pub success: LiteralBool<false>,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            status: LiteralStatus,
            message: unauthorized_message(),
            success: LiteralBool,
        }
    }
}

/// Failure envelope for `403 Forbidden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ForbiddenResponse {
    /// Always `403`.
    pub status: LiteralStatus<403>,
    /// Human-readable failure message.
    #[serde(default = "forbidden_message")]
    pub message: String,
    /// Always `false`.
    pub success: LiteralBool<false>,
}

impl Default for ForbiddenResponse {
    fn default() -> Self {
        Self {
            status: LiteralStatus,
            message: forbidden_message(),
            success: LiteralBool,
        }
    }
}

/// Failure envelope for `404 Not Found`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct NotFoundResponse {
    /// Always `404`.
    pub status: LiteralStatus<404>,
    /// Human-readable failure message.
    #[serde(default = "not_found_message")]
    pub message: String,
    /// Always `false`.
    pub success: LiteralBool<false>,
}

impl Default for NotFoundResponse {
    fn default() -> Self {
        Self {
            status: LiteralStatus,
            message: not_found_message(),
            success: LiteralBool,
        }
    }
}

/// Failure envelope for `500 Internal Server Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct InternalServerErrorResponse {
    /// Always `500`.
    pub status: LiteralStatus<500>,
    /// Human-readable failure message.
    #[serde(default = "internal_server_error_message")]
    pub message: String,
    /// Always `false`.
    pub success: LiteralBool<false>,
}

impl Default for InternalServerErrorResponse {
    fn default() -> Self {
        Self {
            status: LiteralStatus,
            message: internal_server_error_message(),
            success: LiteralBool,
        }
    }
}

//! OpenAPI document generation and emission.

mod document;
mod emit;
mod generate;

pub use self::document::{
    ApiKeyLocation, Components, Info, JSON_MEDIA_TYPE, MediaType, OPENAPI_VERSION,
    OpenApiDocument, Operation, Parameter, ParameterLocation, RequestBody, ResponseObject,
    SecurityScheme, Server, security_schemes,
};
pub use self::emit::{BINARY_FILE_SCHEMA, DEFAULT_OUTPUT_PATHS, render_document, write_document};
pub use self::generate::{DocumentOptions, generate_document};

/// Tracing target for OpenAPI generation.
pub const TRACING_TARGET: &str = "libra_contract::openapi";

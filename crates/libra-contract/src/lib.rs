#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod contracts;
mod error;
pub mod openapi;
mod resource;
mod route;
mod router;
mod schema;
mod security;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::resource::{ResourceContractSpec, create_resource_contract, route_names};
pub use crate::route::{Method, RouteDescriptor, fail_responses};
pub use crate::router::{ContractNode, ContractRouter};
pub use crate::schema::{ContractSchema, FieldViolation, SchemaError, SchemaType};
pub use crate::security::{
    BEARER_AUTH, COOKIE_AUTH, SecurityMetadata, SecurityOptions, SecurityRequirement,
    SecurityType, parse_security_metadata, security_metadata,
};

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod envelope;
mod literal;
mod model;

pub mod auth;
pub mod ebook;
pub mod health;
pub mod reader;
pub mod share;
pub mod sync;
pub mod user;

pub use crate::envelope::{
    DataResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
    PaginatedResponse, Response, UnauthorizedResponse,
};
pub use crate::literal::{LiteralBool, LiteralStatus};
pub use crate::model::{
    Empty, FileKind, FileUpload, GetManyQuery, IdParams, Model, OrderDirection, PreloadsQuery,
};

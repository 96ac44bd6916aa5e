//! Contract construction and validation errors.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::schema::SchemaError;

/// Type alias for boxed errors that are Send + Sync.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for contract operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing contract errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized security type. Fatal at construction time.
    InvalidSecurityType,
    /// Inconsistent route table, e.g. two routes sharing a method and path.
    Contract,
    /// Value rejected by a declared schema.
    Schema,
    /// Document encoding failure.
    Serialization,
    /// File system operation failure.
    Io,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSecurityType => "invalid_security_type",
            Self::Contract => "contract",
            Self::Schema => "schema",
            Self::Serialization => "serialization",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract error with structured information.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error to this error.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the schema violations if this is a schema error.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        self.source.as_deref()?.downcast_ref::<SchemaError>()
    }

    /// Creates a new invalid security type error.
    #[inline]
    pub fn invalid_security_type(value: &str) -> Self {
        Self::new(
            ErrorKind::InvalidSecurityType,
            format!("unhandled security type: {value}"),
        )
    }

    /// Creates a new contract error.
    #[inline]
    pub fn contract(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Contract, message)
    }

    /// Creates a new serialization error.
    #[inline]
    pub fn serialization(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Creates a new I/O error.
    #[inline]
    pub fn io(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Io, message)
    }
}

impl From<SchemaError> for Error {
    fn from(error: SchemaError) -> Self {
        Self::new(ErrorKind::Schema, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

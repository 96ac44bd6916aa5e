//! Literal-pinned wire values.
//!
//! Some envelope fields accept exactly one value: paginated responses always
//! carry `status: 200` and failure responses always carry `success: false`.
//! These zero-sized types serialize to their pinned value, reject every other
//! value on deserialization and describe themselves as a single-value enum in
//! the generated JSON schema.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::{self, Deserializer, Unexpected};
use serde::{Deserialize, Serialize, Serializer};

/// HTTP status code pinned to `CODE`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LiteralStatus<const CODE: u16>;

impl<const CODE: u16> LiteralStatus<CODE> {
    /// Returns the pinned status code.
    #[inline]
    pub const fn code(self) -> u16 {
        CODE
    }
}

impl<const CODE: u16> fmt::Debug for LiteralStatus<CODE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiteralStatus({CODE})")
    }
}

impl<const CODE: u16> Serialize for LiteralStatus<CODE> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(CODE)
    }
}

impl<'de, const CODE: u16> Deserialize<'de> for LiteralStatus<CODE> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u16::deserialize(deserializer)?;
        if value == CODE {
            return Ok(Self);
        }

        let expected = format!("status code {CODE}");
        Err(de::Error::invalid_value(
            Unexpected::Unsigned(u64::from(value)),
            &expected.as_str(),
        ))
    }
}

impl<const CODE: u16> JsonSchema for LiteralStatus<CODE> {
    fn schema_name() -> Cow<'static, str> {
        Cow::Owned(format!("Status{CODE}"))
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "enum": [CODE],
        })
    }
}

/// Boolean pinned to `VALUE`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LiteralBool<const VALUE: bool>;

impl<const VALUE: bool> LiteralBool<VALUE> {
    /// Returns the pinned value.
    #[inline]
    pub const fn value(self) -> bool {
        VALUE
    }
}

impl<const VALUE: bool> fmt::Debug for LiteralBool<VALUE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiteralBool({VALUE})")
    }
}

impl<const VALUE: bool> Serialize for LiteralBool<VALUE> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(VALUE)
    }
}

impl<'de, const VALUE: bool> Deserialize<'de> for LiteralBool<VALUE> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = bool::deserialize(deserializer)?;
        if value == VALUE {
            return Ok(Self);
        }

        let expected = format!("literal `{VALUE}`");
        Err(de::Error::invalid_value(
            Unexpected::Bool(value),
            &expected.as_str(),
        ))
    }
}

impl<const VALUE: bool> JsonSchema for LiteralBool<VALUE> {
    fn schema_name() -> Cow<'static, str> {
        if VALUE {
            Cow::Borrowed("True")
        } else {
            Cow::Borrowed("False")
        }
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "boolean",
            "enum": [VALUE],
        })
    }
}

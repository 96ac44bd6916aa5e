//! Type-erased schema handles and structured validation failures.
//!
//! Route descriptors refer to their input and response shapes through a
//! [`ContractSchema`], a small copyable handle that can describe the type as
//! JSON schema and validate arbitrary JSON values against it. Validation runs
//! serde deserialization followed by the type's `validator` constraints and
//! maps both failure modes onto [`FieldViolation`]s.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use convert_case::{Case, Casing};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::{Path, Segment};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Types usable as route inputs and responses.
pub trait SchemaType: JsonSchema + DeserializeOwned + Validate + 'static {}

impl<T> SchemaType for T where T: JsonSchema + DeserializeOwned + Validate + 'static {}

/// Copyable handle to a schema type.
#[derive(Clone, Copy)]
pub struct ContractSchema {
    type_id: TypeId,
    name: fn() -> Cow<'static, str>,
    subschema: fn(&mut SchemaGenerator) -> Schema,
    validate: fn(Value) -> Result<(), SchemaError>,
}

impl ContractSchema {
    /// Creates a handle for `T`.
    pub fn of<T: SchemaType>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: T::schema_name,
            subschema: subschema_for::<T>,
            validate: validate_value::<T>,
        }
    }

    /// Returns true if the handle describes `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Returns the schema name, e.g. `UserResponse` for `DataResponse<User>`.
    pub fn name(&self) -> Cow<'static, str> {
        (self.name)()
    }

    /// Returns the schema as referenced from within a document.
    ///
    /// Named types are registered in the generator's definitions and returned
    /// as a `$ref`.
    pub fn subschema(&self, generator: &mut SchemaGenerator) -> Schema {
        (self.subschema)(generator)
    }

    /// Validates a JSON value against the schema.
    pub fn validate(&self, value: Value) -> Result<(), SchemaError> {
        (self.validate)(value)
    }
}

impl PartialEq for ContractSchema {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ContractSchema {}

impl fmt::Debug for ContractSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContractSchema").field(&self.name()).finish()
    }
}

fn subschema_for<T: JsonSchema>(generator: &mut SchemaGenerator) -> Schema {
    generator.subschema_for::<T>()
}

fn validate_value<T: SchemaType>(value: Value) -> Result<(), SchemaError> {
    let instance: T = serde_path_to_error::deserialize(&value).map_err(|error| {
        let violation = FieldViolation::from(&error);
        SchemaError::new(T::schema_name(), vec![violation])
    })?;

    instance
        .validate()
        .map_err(|errors| SchemaError::from_validation(T::schema_name(), &errors, &value))
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path of the field, e.g. `data.username` or `data[1].label`.
    /// Empty when the failure is not attributable to a single field.
    pub path: String,
    /// Machine-readable reason, e.g. `length` or `missing_field`.
    pub code: Cow<'static, str>,
    /// Human-readable message.
    pub message: String,
}

impl FieldViolation {
    /// Creates a new violation.
    pub fn new(
        path: impl Into<String>,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&serde_path_to_error::Error<serde_json::Error>> for FieldViolation {
    fn from(error: &serde_path_to_error::Error<serde_json::Error>) -> Self {
        let parent = format_path(error.path());
        let message = error.inner().to_string();
        let field = |prefix: &str| {
            let rest = message.strip_prefix(prefix)?;
            rest.split('`').next().map(|name| join_path(&parent, name))
        };

        if let Some(path) = field("missing field `") {
            return Self::new(path, "missing_field", message);
        }
        if let Some(path) = field("unknown field `") {
            return Self::new(path, "unknown_field", message);
        }
        Self::new(parent, "invalid_type", message)
    }
}

/// Formats a deserializer path as `data[1].username`. The root is empty.
fn format_path(path: &Path) -> String {
    let mut out = String::new();
    for segment in path.iter() {
        match segment {
            Segment::Seq { index } => out.push_str(&format!("[{index}]")),
            Segment::Map { key } => out = join_path(&out, key),
            segment => out = join_path(&out, &segment.to_string()),
        }
    }
    out
}

/// Value rejected by a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    schema: Cow<'static, str>,
    violations: Vec<FieldViolation>,
}

impl SchemaError {
    /// Creates a new schema error.
    pub fn new(schema: impl Into<Cow<'static, str>>, violations: Vec<FieldViolation>) -> Self {
        Self {
            schema: schema.into(),
            violations,
        }
    }

    /// Flattens nested `validator` errors into dotted field paths.
    ///
    /// `validator` reports Rust field names. Each one is mapped to the key
    /// found in `instance`, falling back to its camelCase form.
    pub fn from_validation(
        schema: impl Into<Cow<'static, str>>,
        errors: &ValidationErrors,
        instance: &Value,
    ) -> Self {
        let mut violations = Vec::new();
        collect_violations("", Some(instance), errors, &mut violations);
        violations.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.code.cmp(&b.code)));
        Self::new(schema, violations)
    }

    /// Returns the name of the rejecting schema.
    #[inline]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Returns the individual violations.
    #[inline]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns true if some violation concerns `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|violation| violation.path == path)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed validation", self.schema)?;
        for (index, violation) in self.violations.iter().enumerate() {
            let separator = if index == 0 { ": " } else { ". " };
            write!(f, "{separator}{}", violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_owned()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Returns the wire key of a Rust field name within `node`.
fn wire_name(node: Option<&Value>, field: &str) -> String {
    match node.and_then(Value::as_object) {
        Some(object) if object.contains_key(field) => field.to_owned(),
        _ => field.from_case(Case::Snake).to_case(Case::Camel),
    }
}

fn collect_violations(
    prefix: &str,
    node: Option<&Value>,
    errors: &ValidationErrors,
    out: &mut Vec<FieldViolation>,
) {
    for (field, kind) in errors.errors() {
        // Struct-level errors belong to the enclosing object.
        let (path, child) = match field.as_ref() {
            "__all__" => (prefix.to_owned(), node),
            field => {
                let name = wire_name(node, field);
                let child = node.and_then(|node| node.get(&name));
                (join_path(prefix, &name), child)
            }
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = format_validation_error(&path, error);
                    out.push(FieldViolation::new(path.clone(), error.code.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_violations(&path, child, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item = child.and_then(|child| child.get(*index));
                    collect_violations(&format!("{path}[{index}]"), item, nested, out);
                }
            }
        }
    }
}

/// Formats validation errors with context-aware, user-friendly messages.
fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{field}': {custom_message}");
    }

    let message = match error.code.as_ref() {
        "required" => "is required and cannot be empty".to_owned(),
        "length" => return format_length_error(field, &error.params),
        "range" => return format_range_error(field, &error.params),
        "email" => "must be a valid email address (e.g., user@example.com)".to_owned(),
        "url" => "must be a valid URL (e.g., https://example.com)".to_owned(),
        code => format!("failed validation: {code}"),
    };

    format!("Field '{field}' {message}")
}

fn format_length_error(field: &str, params: &HashMap<Cow<'static, str>, Value>) -> String {
    let number = |key: &str| params.get(key).and_then(Value::as_u64);

    match (number("equal"), number("min"), number("max")) {
        (Some(equal), _, _) => format!("Field '{field}' must be exactly {equal} characters long"),
        (None, Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        (None, Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
        (None, None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
        _ => format!("Field '{field}' has invalid length"),
    }
}

fn format_range_error(field: &str, params: &HashMap<Cow<'static, str>, Value>) -> String {
    let number = |key: &str| params.get(key).and_then(Value::as_f64);

    match (number("min"), number("max")) {
        (Some(min), Some(max)) => format!("Field '{field}' must be between {min} and {max}"),
        (Some(min), None) => format!("Field '{field}' must be at least {min}"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max}"),
        _ => format!("Field '{field}' is out of valid range"),
    }
}

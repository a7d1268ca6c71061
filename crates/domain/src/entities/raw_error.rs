//! Raw data-access errors
//!
//! The unprocessed failure surfaced by the document layer, before any
//! classification. The shape mirrors what object-document mappers put on
//! the wire: a discriminating `name`, a free-form `message` and a handful of
//! optional category-specific fields. Every field except `name` may be
//! missing, and consumers must treat a missing field as "not this category".

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Discriminator of schema validation failures
pub const VALIDATION_ERROR: &str = "ValidationError";

/// Discriminator of type conversion failures
pub const CAST_ERROR: &str = "CastError";

/// Discriminator of errors reported by the database server
pub const MONGO_SERVER_ERROR: &str = "MongoServerError";

/// Server error code of unique index violations
pub const DUPLICATE_KEY_CODE: &str = "11000";

/// A single failing path inside a validation error
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidatorError {
    /// Human-readable failure text
    #[serde(default, deserialize_with = "text_or_empty")]
    pub message: String,
    /// Validator that failed (`required`, `min`, a type name, ...)
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    /// Field path
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,
    /// Offending value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidatorError {
    /// Create a validator error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Set the validator kind
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the field path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the offending value
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Raw error as raised by the data-access layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawError {
    /// Error discriminator, e.g. `ValidationError`
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,

    /// Free-form message
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,

    /// Validation failures by field, in the order they were detected
    #[serde(
        default,
        deserialize_with = "validator_errors",
        skip_serializing_if = "Option::is_none"
    )]
    pub errors: Option<IndexMap<String, ValidatorError>>,

    /// Field that failed conversion
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,

    /// Value that failed conversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Target type of a failed conversion
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// Server error code; a number or a string depending on the driver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,

    /// Colliding values by field for unique index violations
    #[serde(
        default,
        deserialize_with = "key_values",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_value: Option<IndexMap<String, Value>>,

    /// Stack or backtrace text, when the producer captured one
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub stack: Option<String>,
}

impl RawError {
    /// Create a raw error with a name and a message
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Create a schema validation failure
    pub fn validation<I>(message: impl Into<String>, errors: I) -> Self
    where
        I: IntoIterator<Item = (String, ValidatorError)>,
    {
        Self {
            errors: Some(errors.into_iter().collect()),
            ..Self::new(VALIDATION_ERROR, message)
        }
    }

    /// Create a type conversion failure for `path`
    pub fn cast(path: impl Into<String>, value: Value, kind: impl Into<String>) -> Self {
        let path = path.into();
        let kind = kind.into();
        Self {
            message: Some(cast_failure_message(&kind, &value, &path)),
            path: Some(path),
            value: Some(value),
            kind: Some(kind),
            ..Self::new(CAST_ERROR, String::new())
        }
    }

    /// Create a unique index violation on `field` within `namespace`
    /// (`<database>.<collection>`)
    pub fn duplicate_key(namespace: &str, field: &str, value: Value) -> Self {
        let message = format!(
            "E11000 duplicate key error collection: {namespace} index: {field}_1 dup key: {{ {field}: {value} }}"
        );
        let mut key_value = IndexMap::new();
        key_value.insert(field.to_string(), value);
        Self {
            code: Some(Value::from(11000)),
            key_value: Some(key_value),
            ..Self::new(MONGO_SERVER_ERROR, message)
        }
    }

    /// Set the server error code
    #[must_use]
    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the colliding key values
    #[must_use]
    pub fn with_key_value<I>(mut self, key_value: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.key_value = Some(key_value.into_iter().collect());
        self
    }

    /// Attach stack text
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// The message, if present and non-empty
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// The error code in its decimal string form, if present
    pub fn code_string(&self) -> Option<String> {
        self.code.as_ref().map(display_value)
    }

    /// Whether the error code stringifies to `expected`
    pub fn has_code(&self, expected: &str) -> bool {
        self.code_string().is_some_and(|code| code == expected)
    }
}

impl fmt::Display for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "Error"
        } else {
            &self.name
        };
        match self.message_text() {
            Some(message) => write!(f, "{name}: {message}"),
            None => f.write_str(name),
        }
    }
}

impl std::error::Error for RawError {}

/// Render a JSON value as plain text
///
/// Strings are written without quotes, everything else in its JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Name of the JSON type of `value`
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Message of a conversion failure of `value` to `kind` at `path`
pub fn cast_failure_message(kind: &str, value: &Value, path: &str) -> String {
    format!(
        "Cast to {kind} failed for value \"{}\" (type {}) at path \"{path}\"",
        display_value(value),
        json_type_name(value)
    )
}

// Field deserializers below accept any JSON value: null is absent,
// mistyped text is stringified, non-object maps are absent.

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => Some(display_value(&value)),
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn validator_errors<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, ValidatorError>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    let errors = entries
        .into_iter()
        .map(|(path, entry)| {
            let error = match entry {
                Value::Object(_) => serde_json::from_value(entry).unwrap_or_default(),
                Value::Null => ValidatorError::default(),
                other => ValidatorError::new(display_value(&other)),
            };
            (path, error)
        })
        .collect();
    Ok(Some(errors))
}

fn key_values<'de, D>(deserializer: D) -> Result<Option<IndexMap<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(entries) => Some(entries.into_iter().collect()),
        _ => None,
    })
}

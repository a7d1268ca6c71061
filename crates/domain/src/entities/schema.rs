//! Document schemas
//!
//! A schema names a collection and lists its fields in declaration order.
//! Casting a document against it either yields the document restricted to
//! the declared fields or a `ValidationError` raw error listing every
//! failing field.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::raw_error::{RawError, ValidatorError, cast_failure_message};
use crate::{errors::DomainError, value_objects::ObjectId};

/// A stored or incoming document
pub type Document = IndexMap<String, Value>;

/// Name of the identifier field
pub const ID_FIELD: &str = "_id";

/// Type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// JSON string
    String,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
    /// 24 character hex string
    ObjectId,
}

impl FieldType {
    /// Type name used in cast failure messages
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::ObjectId => "ObjectId",
        }
    }

    /// Whether `value` is acceptable for this type
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::ObjectId => value.as_str().is_some_and(|s| ObjectId::parse(s).is_ok()),
        }
    }
}

/// A single field of a schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    name: String,
    field_type: FieldType,
    required: Option<String>,
    min: Option<(f64, String)>,
    unique: bool,
}

impl FieldDefinition {
    /// Create an optional, non-unique field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: None,
            min: None,
            unique: false,
        }
    }

    /// Require the field, failing with `message` when it is missing
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Reject numbers below `min`, failing with `message`
    #[must_use]
    pub fn min(mut self, min: f64, message: impl Into<String>) -> Self {
        self.min = Some((min, message.into()));
        self
    }

    /// Back the field with a unique index
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the field is backed by a unique index
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    fn check(&self, value: Option<&Value>) -> Result<Option<Value>, ValidatorError> {
        let value = match value {
            None | Some(Value::Null) => {
                return match &self.required {
                    Some(message) => Err(ValidatorError::new(message.clone())
                        .with_kind("required")
                        .with_path(self.name.clone())),
                    None => Ok(None),
                };
            },
            Some(value) => value,
        };

        if !self.field_type.accepts(value) {
            let kind = self.field_type.name();
            return Err(
                ValidatorError::new(cast_failure_message(kind, value, &self.name))
                    .with_kind(kind)
                    .with_path(self.name.clone())
                    .with_value(value.clone()),
            );
        }

        if let (Some((min, message)), Some(number)) = (&self.min, value.as_f64()) {
            if number < *min {
                return Err(ValidatorError::new(message.clone())
                    .with_kind("min")
                    .with_path(self.name.clone())
                    .with_value(value.clone()));
            }
        }

        Ok(Some(value.clone()))
    }
}

/// Schema of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    collection: String,
    fields: Vec<FieldDefinition>,
}

impl Schema {
    /// Create a schema
    ///
    /// Fails when the collection name is empty, a field is declared twice
    /// or a field shadows `_id`.
    pub fn new(
        collection: impl Into<String>,
        fields: Vec<FieldDefinition>,
    ) -> Result<Self, DomainError> {
        let collection = collection.into();
        if collection.trim().is_empty() {
            return Err(DomainError::InvalidSchema(
                "collection name must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if field.name == ID_FIELD {
                return Err(DomainError::InvalidSchema(format!(
                    "{ID_FIELD} is managed by the store"
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::InvalidSchema(format!(
                    "duplicate field: {}",
                    field.name
                )));
            }
        }

        Ok(Self { collection, fields })
    }

    /// Collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Names of fields backed by a unique index
    pub fn unique_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.is_unique())
            .map(FieldDefinition::name)
    }

    /// Validate `document` and keep only declared fields
    ///
    /// All fields are checked; the returned error lists every failure in
    /// declaration order.
    pub fn cast(&self, document: &Document) -> Result<Document, RawError> {
        let mut cast = Document::new();
        let mut errors = IndexMap::new();

        for field in &self.fields {
            match field.check(document.get(&field.name)) {
                Ok(Some(value)) => {
                    cast.insert(field.name.clone(), value);
                },
                Ok(None) => {},
                Err(err) => {
                    errors.insert(field.name.clone(), err);
                },
            }
        }

        if errors.is_empty() {
            return Ok(cast);
        }

        let summary = errors
            .iter()
            .map(|(path, err)| format!("{path}: {}", err.message))
            .collect::<Vec<_>>()
            .join(", ");
        Err(RawError::validation(
            format!("{} validation failed: {summary}", self.collection),
            errors,
        ))
    }
}

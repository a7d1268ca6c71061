//! Handled error results
//!
//! What a raw error becomes after classification: either a structured
//! operational error carrying an HTTP status code, or a generic record for
//! failures nobody recognized.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::ErrorStatus;

/// Category a raw error falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Document failed schema validation
    ValidationFailure,
    /// A value could not be converted to the field's type
    TypeCastFailure,
    /// A write collided with a unique index
    UniqueConstraintViolation,
    /// Anything else
    Unrecognized,
}

impl ErrorCategory {
    /// Whether errors of this category are expected and client-correctable
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    /// Snake case label for logs and metrics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailure => "validation_failure",
            Self::TypeCastFailure => "type_cast_failure",
            Self::UniqueConstraintViolation => "unique_constraint_violation",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured operational error
///
/// Only constructible through [`StructuredError::new`], so `status` always
/// agrees with `status_code` and `is_operational` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct StructuredError {
    message: String,
    status_code: u16,
    status: ErrorStatus,
    is_operational: bool,
}

impl StructuredError {
    /// Create a structured error, deriving `status` from `status_code`
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            status: ErrorStatus::from_status_code(status_code),
            is_operational: true,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Status derived from the code
    pub const fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Always `true` for structured errors
    pub const fn is_operational(&self) -> bool {
        self.is_operational
    }
}

/// Generic result for unrecognized raw errors
///
/// Serializes as `{"type": "unknown", "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "unknown")]
pub struct UnknownErrorResult {
    /// Message of the raw error or a generic fallback
    pub message: String,
}

impl UnknownErrorResult {
    /// Value of the `type` discriminator
    pub const TYPE: &'static str = "unknown";

    /// Create an unknown error result
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of classifying a raw error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HandledError {
    /// Recognized operational error
    Structured(StructuredError),
    /// Unrecognized error
    Unknown(UnknownErrorResult),
}

impl HandledError {
    /// Message to surface to the client
    pub fn message(&self) -> &str {
        match self {
            Self::Structured(e) => e.message(),
            Self::Unknown(e) => &e.message,
        }
    }

    /// HTTP status code, only known for structured errors
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Structured(e) => Some(e.status_code()),
            Self::Unknown(_) => None,
        }
    }

    /// Derived status, only known for structured errors
    pub const fn status(&self) -> Option<ErrorStatus> {
        match self {
            Self::Structured(e) => Some(e.status()),
            Self::Unknown(_) => None,
        }
    }

    /// Whether the error is operational
    pub const fn is_operational(&self) -> bool {
        match self {
            Self::Structured(e) => e.is_operational(),
            Self::Unknown(_) => false,
        }
    }

    /// `type` discriminator, only present on unknown results
    pub const fn error_type(&self) -> Option<&'static str> {
        match self {
            Self::Structured(_) => None,
            Self::Unknown(_) => Some(UnknownErrorResult::TYPE),
        }
    }
}

impl From<StructuredError> for HandledError {
    fn from(err: StructuredError) -> Self {
        Self::Structured(err)
    }
}

impl From<UnknownErrorResult> for HandledError {
    fn from(err: UnknownErrorResult) -> Self {
        Self::Unknown(err)
    }
}

//! Per-category message formatting
//!
//! Pure functions turning a recognized raw error into a structured
//! operational error. Each reads only the fields of its own category and
//! tolerates their absence.

use domain::{RawError, StructuredError, display_value};

/// Status code of every operational data-access error
pub const OPERATIONAL_STATUS_CODE: u16 = 400;

const VALIDATION_PREFIX: &str = "Validation error: ";
const UNKNOWN_VALIDATION_MESSAGE: &str = "Unknown validation error";
const DUPLICATE_FALLBACK_MESSAGE: &str = "Duplicate field value entered";

/// Format a schema validation failure
///
/// Joins the per-field messages with `", "` in detection order, skipping
/// entries without a message. Without any field message the raw message is
/// used instead.
#[must_use]
pub fn format_validation_error(raw: &RawError) -> StructuredError {
    let messages: Vec<&str> = raw
        .errors
        .iter()
        .flat_map(|errors| errors.values())
        .map(|err| err.message.as_str())
        .filter(|message| !message.is_empty())
        .collect();

    let details = if messages.is_empty() {
        raw.message_text()
            .unwrap_or(UNKNOWN_VALIDATION_MESSAGE)
            .to_string()
    } else {
        messages.join(", ")
    };

    StructuredError::new(format!("{VALIDATION_PREFIX}{details}"), OPERATIONAL_STATUS_CODE)
}

/// Format a type conversion failure as `Invalid <path>: <value>`
#[must_use]
pub fn format_cast_error(raw: &RawError) -> StructuredError {
    let path = raw.path.as_deref().unwrap_or_default();
    let value = raw.value.as_ref().map(display_value).unwrap_or_default();

    StructuredError::new(format!("Invalid {path}: {value}"), OPERATIONAL_STATUS_CODE)
}

/// Format a unique index violation
///
/// Only the first colliding field is named, even when several collided.
#[must_use]
pub fn format_duplicate_key_error(raw: &RawError) -> StructuredError {
    let first_key = raw
        .key_value
        .as_ref()
        .and_then(|key_value| key_value.keys().next());

    let message = match first_key {
        Some(field) => format!("Duplicate field value: {field}. Please use another one!"),
        None => DUPLICATE_FALLBACK_MESSAGE.to_string(),
    };

    StructuredError::new(message, OPERATIONAL_STATUS_CODE)
}

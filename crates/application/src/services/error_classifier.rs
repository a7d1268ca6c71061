//! Raw error classification
//!
//! Single decision point between the data-access layer and the HTTP layer.
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `name == "ValidationError"` → validation formatter
//! 2. cast failure (see [`is_cast_error`]) → cast formatter
//! 3. `name == "MongoServerError"` and code `"11000"` → duplicate key formatter
//! 4. anything else → [`UnknownErrorResult`]
//!
//! Classification never fails and never modifies its input.

use domain::{
    CAST_ERROR, DUPLICATE_KEY_CODE, ErrorCategory, HandledError, MONGO_SERVER_ERROR, RawError,
    UnknownErrorResult, VALIDATION_ERROR,
};
use tracing::debug;

use super::error_formatters::{
    format_cast_error, format_duplicate_key_error, format_validation_error,
};

/// Message of unknown results whose raw error carried none
pub const UNKNOWN_ERROR_MESSAGE: &str = "Something went wrong";

/// Whether `raw` is a type conversion failure
///
/// The raw error must be named `CastError` and expose both the failing
/// `path` and the offending `value`.
pub fn is_cast_error(raw: &RawError) -> bool {
    raw.name == CAST_ERROR && raw.path.is_some() && raw.value.is_some()
}

/// Determine the category of a raw error
pub fn categorize(raw: &RawError) -> ErrorCategory {
    if raw.name == VALIDATION_ERROR {
        ErrorCategory::ValidationFailure
    } else if is_cast_error(raw) {
        ErrorCategory::TypeCastFailure
    } else if raw.name == MONGO_SERVER_ERROR && raw.has_code(DUPLICATE_KEY_CODE) {
        ErrorCategory::UniqueConstraintViolation
    } else {
        ErrorCategory::Unrecognized
    }
}

/// Classify a raw error into a handled result
pub fn classify(raw: &RawError) -> HandledError {
    let category = categorize(raw);
    debug!(name = %raw.name, category = %category, "Classified data-access error");

    match category {
        ErrorCategory::ValidationFailure => format_validation_error(raw).into(),
        ErrorCategory::TypeCastFailure => format_cast_error(raw).into(),
        ErrorCategory::UniqueConstraintViolation => format_duplicate_key_error(raw).into(),
        ErrorCategory::Unrecognized => {
            UnknownErrorResult::new(raw.message_text().unwrap_or(UNKNOWN_ERROR_MESSAGE)).into()
        },
    }
}

//! API error handling
//!
//! Every failure leaving a handler is turned into a [`HandledError`] and
//! written as `{"success": false, "error": ...}` with the matching status.
//! Raw data-access errors go through classification first. In production
//! mode unknown-error messages are sanitized and operational details
//! (`isOperational`, `stack`) are left out.

use std::sync::atomic::{AtomicBool, Ordering};

use application::{ApplicationError, classify};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{ErrorStatus, HandledError, RawError, StructuredError};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Generic text replacing sanitized messages
pub const SANITIZED_MESSAGE: &str = "An error occurred processing your request";

/// Configure whether internal error details should be exposed in responses.
///
/// In production environments, this should be set to `false` to prevent
/// leaking implementation details, stack traces, or sensitive information.
///
/// # Arguments
///
/// * `expose` - If `true`, unknown-error messages are passed through and
///   `isOperational`/`stack` are included. If `false`, unknown-error
///   messages are sanitized and those fields are omitted.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
pub fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Sanitize an error message to remove potentially sensitive information
///
/// This function removes:
/// - File paths
/// - Database connection strings
/// - Stack trace information
/// - Connection details
fn sanitize_error_message(msg: &str, expose: bool) -> String {
    if expose {
        return msg.to_string();
    }

    let sensitive_patterns = [
        // File paths
        "/home/",
        "/Users/",
        "/var/",
        "/etc/",
        "\\Users\\",
        "C:\\",
        // Database patterns
        "postgres://",
        "postgresql://",
        "sqlite://",
        "mysql://",
        "mongodb://",
        "mongodb+srv://",
        // Stack trace indicators
        "at line",
        "stack backtrace",
        "panicked at",
        " at ",
        ".rs:",
        ".js:",
        // Connection details
        "connection refused",
        "ECONNREFUSED",
        "timeout",
    ];

    let msg_lower = msg.to_lowercase();
    if sensitive_patterns
        .iter()
        .any(|pattern| msg_lower.contains(&pattern.to_lowercase()))
    {
        return SANITIZED_MESSAGE.to_string();
    }

    // Anything that still looks like a URL or a long path
    if msg.contains("://") || (msg.contains('/') && msg.len() > 50) {
        return SANITIZED_MESSAGE.to_string();
    }

    msg.to_string()
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Error message
    pub error: String,
    /// `fail` or `error`, structured errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ErrorStatus>,
    /// `unknown`, unrecognized errors only
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Operational flag, only when details are exposed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_operational: Option<bool>,
    /// Stack text of the raw error, only when details are exposed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    /// Build the HTTP status and body for a handled error
    ///
    /// Structured errors keep their status code; unknown ones map to 500.
    pub fn build(handled: &HandledError, stack: Option<&str>, expose: bool) -> (StatusCode, Self) {
        let (status_code, message) = match handled {
            HandledError::Structured(err) => (
                StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                err.message().to_string(),
            ),
            HandledError::Unknown(unknown) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                sanitize_error_message(&unknown.message, expose),
            ),
        };

        let body = Self {
            success: false,
            error: message,
            status: handled.status(),
            error_type: handled.error_type().map(str::to_string),
            is_operational: expose.then(|| handled.is_operational()),
            stack: stack.filter(|_| expose).map(str::to_string),
        };

        (status_code, body)
    }
}

/// Write a handled error as an HTTP response
pub fn write_error_response(handled: &HandledError, stack: Option<&str>) -> Response {
    let (status, body) = ErrorResponse::build(handled, stack, should_expose_details());
    (status, Json(body)).into_response()
}

/// Raw data-access error carried on a response for the error middleware
#[derive(Debug, Clone)]
pub struct DataAccessFailure(pub RawError);

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    DataAccess(#[from] RawError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Convert into a handled result
    ///
    /// Raw data-access errors are classified; the other variants map to
    /// fixed status codes.
    pub fn handled(&self) -> HandledError {
        match self {
            Self::DataAccess(raw) => classify(raw),
            Self::BadRequest(msg) => StructuredError::new(msg.clone(), 400).into(),
            Self::NotFound(msg) => StructuredError::new(msg.clone(), 404).into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let handled = self.handled();
        match self {
            Self::DataAccess(raw) => {
                debug!(name = %raw.name, "Data-access error reached the response");
                let mut response = write_error_response(&handled, raw.stack.as_deref());
                response.extensions_mut().insert(DataAccessFailure(raw));
                response
            },
            Self::BadRequest(_) | Self::NotFound(_) => write_error_response(&handled, None),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::DataAccess(raw) => Self::DataAccess(raw),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

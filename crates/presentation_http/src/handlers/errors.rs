//! Error classification handler

use application::classify;
use axum::{Json, extract::rejection::JsonRejection};
use domain::{HandledError, RawError};
use tracing::debug;

use crate::error::ApiError;

/// Classify a raw error posted as JSON
///
/// Any JSON object is accepted and answers 200 with the classification
/// result itself; only a body that is not a JSON object is a bad request.
pub async fn classify_error(
    payload: Result<Json<RawError>, JsonRejection>,
) -> Result<Json<HandledError>, ApiError> {
    let Json(raw) = payload?;
    let handled = classify(&raw);
    debug!(
        name = %raw.name,
        operational = handled.is_operational(),
        "Raw error classified"
    );
    Ok(Json(handled))
}

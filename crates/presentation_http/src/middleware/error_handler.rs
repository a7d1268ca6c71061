//! Data-access error handling adapters
//!
//! Two ways to turn raw data-access errors into responses:
//!
//! - [`handle_data_errors`]: middleware that picks up raw errors returned by
//!   handlers (through [`ApiError`]) and answers with the request context
//!   attached to the log line.
//! - [`catch_data_errors`]: wraps a single fallible operation inside a
//!   handler and answers on failure.
//!
//! Both end in [`handle_data_error`], which classifies and writes the body.

use std::{convert::Infallible, future::Future};

use application::classify;
use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::{HandledError, RawError};
use tracing::{error, warn};

use super::request_id::RequestId;
use crate::error::{ApiError, DataAccessFailure, write_error_response};

/// Request details attached to error logs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation ID, when the request-id middleware ran
    pub request_id: Option<RequestId>,
    /// HTTP method
    pub method: String,
    /// Request path
    pub path: String,
}

impl RequestContext {
    /// Capture the context of a request
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            request_id: parts.extensions.get::<RequestId>().copied(),
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
        }
    }

    fn from_request(request: &Request) -> Self {
        Self {
            request_id: request.extensions().get::<RequestId>().copied(),
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
        }
    }

    fn request_id_text(&self) -> String {
        self.request_id
            .map_or_else(|| "-".to_string(), |id| id.to_string())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Classify a raw error and write the response for it
///
/// Operational errors are logged as warnings, unknown errors as errors.
pub fn handle_data_error(raw: &RawError, ctx: &RequestContext) -> Response {
    let handled = classify(raw);

    match &handled {
        HandledError::Structured(err) => warn!(
            request_id = %ctx.request_id_text(),
            method = %ctx.method,
            path = %ctx.path,
            status_code = err.status_code(),
            error = %err.message(),
            "Operational data-access error"
        ),
        HandledError::Unknown(unknown) => error!(
            request_id = %ctx.request_id_text(),
            method = %ctx.method,
            path = %ctx.path,
            name = %raw.name,
            error = %unknown.message,
            "Unrecognized data-access error"
        ),
    }

    write_error_response(&handled, raw.stack.as_deref())
}

/// Middleware answering raw data-access errors returned by handlers
///
/// Handlers returning `Err(ApiError::DataAccess(..))` leave the raw error on
/// the response; it is removed here and the response is rewritten with the
/// request context.
pub async fn handle_data_errors(request: Request, next: Next) -> Response {
    let ctx = RequestContext::from_request(&request);
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<DataAccessFailure>() {
        Some(DataAccessFailure(raw)) => handle_data_error(&raw, &ctx),
        None => response,
    }
}

/// Run `operation` once and answer its failure
///
/// Successful results are returned untouched. Raw data-access errors are
/// classified with `ctx`; other API errors use their own response.
pub async fn catch_data_errors<F, Fut, T, E>(ctx: &RequestContext, operation: F) -> Response
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    T: IntoResponse,
    E: Into<ApiError>,
{
    match operation().await {
        Ok(value) => value.into_response(),
        Err(err) => match err.into() {
            ApiError::DataAccess(raw) => handle_data_error(&raw, ctx),
            other => other.into_response(),
        },
    }
}

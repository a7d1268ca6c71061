//! Route definitions

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    handlers,
    middleware::{assign_request_id, handle_data_errors},
    state::AppState,
};

/// Create the main router with all routes
///
/// The request-id layer is outermost so the error middleware sees the ID.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Error classification API (v1)
        .route("/v1/errors/classify", post(handlers::errors::classify_error))
        // Document API (v1)
        .route(
            "/v1/{collection}",
            get(handlers::documents::list_documents).post(handlers::documents::create_document),
        )
        .route("/v1/{collection}/{id}", get(handlers::documents::get_document))
        .layer(middleware::from_fn(handle_data_errors))
        .layer(middleware::from_fn(assign_request_id))
        // Attach state
        .with_state(state)
}

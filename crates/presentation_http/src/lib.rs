//! docfault HTTP presentation layer
//!
//! Serves the document API and turns data-access failures into
//! structured JSON error responses.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{
    ApiError, ErrorResponse, set_expose_internal_errors, should_expose_details,
    write_error_response,
};
pub use middleware::{
    RequestContext, RequestId, assign_request_id, catch_data_errors, handle_data_error,
    handle_data_errors,
};
pub use routes::create_router;
pub use server::serve_until;
pub use state::AppState;

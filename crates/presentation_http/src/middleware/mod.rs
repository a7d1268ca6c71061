//! HTTP middleware components
//!
//! Request correlation and data-access error handling.

pub mod error_handler;
pub mod request_id;

pub use error_handler::{RequestContext, catch_data_errors, handle_data_error, handle_data_errors};
pub use request_id::{REQUEST_ID_HEADER, RequestId, assign_request_id};

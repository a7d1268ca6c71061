//! Application services - Use case implementations

mod document_service;
mod error_classifier;
pub mod error_formatters;

pub use document_service::DocumentService;
pub use error_classifier::{UNKNOWN_ERROR_MESSAGE, categorize, classify, is_cast_error};
pub use error_formatters::OPERATIONAL_STATUS_CODE;

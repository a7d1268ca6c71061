//! Domain entities - raw errors, handled results and documents

mod handled_error;
mod raw_error;
mod schema;

pub use handled_error::{ErrorCategory, HandledError, StructuredError, UnknownErrorResult};
pub use raw_error::{
    CAST_ERROR, DUPLICATE_KEY_CODE, MONGO_SERVER_ERROR, RawError, VALIDATION_ERROR,
    ValidatorError, cast_failure_message, display_value, json_type_name,
};
pub use schema::{Document, FieldDefinition, FieldType, ID_FIELD, Schema};

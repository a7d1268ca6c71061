//! Value Objects - Immutable, identity-less domain primitives

mod error_status;
mod object_id;

pub use error_status::ErrorStatus;
pub use object_id::ObjectId;

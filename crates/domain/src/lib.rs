//! Domain layer for docfault
//!
//! Contains the raw data-access error model, the handled-error result types,
//! document schemas, value objects and domain errors.
//! This layer has no knowledge of HTTP or storage backends.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

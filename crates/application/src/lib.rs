//! Application layer - Use cases and orchestration
//!
//! Classifies raw data-access errors into handled results, defines the
//! document store port and orchestrates schema validation around it.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

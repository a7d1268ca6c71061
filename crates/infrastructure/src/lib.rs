//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains configuration loading, tracing setup and the document store.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, Environment, ErrorHandlingConfig, ServerConfig, StoreConfig};
pub use persistence::InMemoryDocumentStore;
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};

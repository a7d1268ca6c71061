//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod document_store;

pub use document_store::DocumentStorePort;
#[cfg(test)]
pub use document_store::MockDocumentStorePort;

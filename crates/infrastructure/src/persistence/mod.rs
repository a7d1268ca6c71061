//! Persistence module
//!
//! In-memory document storage with unique indexes.

pub mod in_memory_store;

pub use in_memory_store::InMemoryDocumentStore;

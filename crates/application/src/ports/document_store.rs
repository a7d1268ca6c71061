//! Document store port
//!
//! Defines the interface for persisting schema-validated documents.
//! Failures the store itself detects (unique index violations) surface as
//! `ApplicationError::DataAccess` carrying the raw error.

use async_trait::async_trait;
use domain::{Document, ObjectId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for document persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Create a unique index on `field` of `collection`
    ///
    /// Idempotent; existing documents are not re-checked.
    async fn ensure_unique_index(&self, collection: &str, field: &str)
    -> Result<(), ApplicationError>;

    /// Insert a document
    ///
    /// Assigns `_id` and `createdAt` and returns the stored document.
    async fn insert(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<Document, ApplicationError>;

    /// Get a document by ID
    async fn find_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, ApplicationError>;

    /// List documents in insertion order
    async fn list(&self, collection: &str, limit: usize)
    -> Result<Vec<Document>, ApplicationError>;
}

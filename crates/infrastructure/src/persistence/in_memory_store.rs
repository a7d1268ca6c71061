//! In-memory document store
//!
//! Thread-safe document storage backed by `parking_lot` locks. Unique
//! indexes are enforced on insert and violations are reported as
//! `MongoServerError` raw errors with code 11000, like a database server
//! would.

use std::collections::HashMap;

use application::{error::ApplicationError, ports::DocumentStorePort};
use async_trait::async_trait;
use chrono::Utc;
use domain::{Document, ID_FIELD, ObjectId, RawError};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Name of the creation timestamp field
pub const CREATED_AT_FIELD: &str = "createdAt";

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<Document>,
    unique_fields: Vec<String>,
}

impl Collection {
    /// First unique field whose value in `document` is already taken
    fn find_collision<'a>(&self, document: &'a Document) -> Option<(&str, &'a Value)> {
        self.unique_fields.iter().find_map(|field| {
            let value = document.get(field).filter(|v| !v.is_null())?;
            self.documents
                .iter()
                .any(|existing| existing.get(field) == Some(value))
                .then_some((field.as_str(), value))
        })
    }
}

/// Document store keeping everything in process memory
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    database: String,
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store for `database`
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, |c| c.documents.len())
    }

    fn namespace(&self, collection: &str) -> String {
        format!("{}.{collection}", self.database)
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    #[instrument(skip(self))]
    async fn ensure_unique_index(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<(), ApplicationError> {
        let mut collections = self.collections.write();
        let entry = collections.entry(collection.to_string()).or_default();
        if !entry.unique_fields.iter().any(|f| f == field) {
            entry.unique_fields.push(field.to_string());
            debug!("Unique index created");
        }
        Ok(())
    }

    #[instrument(skip(self, document))]
    async fn insert(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Document, ApplicationError> {
        let mut collections = self.collections.write();
        let entry = collections.entry(collection.to_string()).or_default();

        if let Some((field, value)) = entry.find_collision(&document) {
            warn!(field, "Unique index violation");
            return Err(
                RawError::duplicate_key(&self.namespace(collection), field, value.clone()).into(),
            );
        }

        let id = ObjectId::new();
        document.shift_insert(0, ID_FIELD.to_string(), Value::String(id.to_string()));
        document.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        entry.documents.push(document.clone());

        debug!(%id, "Document inserted");
        Ok(document)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, ApplicationError> {
        let wanted = Value::String(id.to_string());
        let collections = self.collections.read();
        Ok(collections.get(collection).and_then(|c| {
            c.documents
                .iter()
                .find(|doc| doc.get(ID_FIELD) == Some(&wanted))
                .cloned()
        }))
    }

    async fn list(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, ApplicationError> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|c| c.documents.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use domain::{DUPLICATE_KEY_CODE, MONGO_SERVER_ERROR};
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() {
        let store = InMemoryDocumentStore::new("test");
        let stored = store
            .insert("users", doc(json!({ "email": "a@x.com" })))
            .await
            .unwrap();

        assert_eq!(stored.keys().next().map(String::as_str), Some(ID_FIELD));
        let id = stored[ID_FIELD].as_str().unwrap();
        assert!(ObjectId::parse(id).is_ok());
        assert!(stored.contains_key(CREATED_AT_FIELD));
        assert_eq!(store.count("users"), 1);
    }

    #[tokio::test]
    async fn find_by_id_returns_inserted_document() {
        let store = InMemoryDocumentStore::new("test");
        let stored = store
            .insert("users", doc(json!({ "email": "a@x.com" })))
            .await
            .unwrap();
        let id = ObjectId::parse(stored[ID_FIELD].as_str().unwrap()).unwrap();

        let found = store.find_by_id("users", &id).await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn find_by_id_unknown_is_none() {
        let store = InMemoryDocumentStore::new("test");
        let found = store.find_by_id("users", &ObjectId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn unique_index_rejects_duplicates() {
        let store = InMemoryDocumentStore::new("shop");
        store.ensure_unique_index("users", "email").await.unwrap();
        store
            .insert("users", doc(json!({ "email": "a@x.com" })))
            .await
            .unwrap();

        let err = store
            .insert("users", doc(json!({ "email": "a@x.com" })))
            .await
            .unwrap_err();

        let raw = err.as_raw().unwrap();
        assert_eq!(raw.name, MONGO_SERVER_ERROR);
        assert!(raw.has_code(DUPLICATE_KEY_CODE));
        assert_eq!(
            raw.key_value.as_ref().unwrap()["email"],
            json!("a@x.com")
        );
        assert!(raw.message_text().unwrap().contains("shop.users"));
        assert_eq!(store.count("users"), 1);
    }

    #[tokio::test]
    async fn unique_index_ignores_missing_values() {
        let store = InMemoryDocumentStore::new("test");
        store.ensure_unique_index("users", "email").await.unwrap();
        store.insert("users", doc(json!({ "name": "a" }))).await.unwrap();
        store.insert("users", doc(json!({ "name": "b" }))).await.unwrap();
        assert_eq!(store.count("users"), 2);
    }

    #[tokio::test]
    async fn ensure_unique_index_is_idempotent() {
        let store = InMemoryDocumentStore::new("test");
        tokio_test::assert_ok!(store.ensure_unique_index("users", "email").await);
        tokio_test::assert_ok!(store.ensure_unique_index("users", "email").await);
        assert_eq!(store.collections.read()["users"].unique_fields.len(), 1);
    }

    #[tokio::test]
    async fn list_respects_limit_and_order() {
        let store = InMemoryDocumentStore::new("test");
        for n in 0..5 {
            store.insert("items", doc(json!({ "n": n }))).await.unwrap();
        }

        let listed = store.list("items", 3).await.unwrap();
        let ns: Vec<_> = listed.iter().map(|d| d["n"].clone()).collect();
        assert_eq!(ns, vec![json!(0), json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn list_unknown_collection_is_empty() {
        let store = InMemoryDocumentStore::new("test");
        assert!(store.list("nothing", 10).await.unwrap().is_empty());
    }
}

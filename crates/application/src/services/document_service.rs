//! Document service
//!
//! Validates documents against registered schemas before handing them to
//! the store. Validation and identifier failures are raised as raw
//! data-access errors, the same shape the store uses for index violations,
//! so callers have a single error surface to classify.

use std::{collections::HashMap, fmt, sync::Arc};

use domain::{Document, ID_FIELD, ObjectId, RawError, Schema};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{error::ApplicationError, ports::DocumentStorePort};

/// Document use cases over a set of schemas
pub struct DocumentService {
    store: Arc<dyn DocumentStorePort>,
    schemas: HashMap<String, Schema>,
}

impl fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentService")
            .field("collections", &self.schemas.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl DocumentService {
    /// Create a service without any schemas
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            store,
            schemas: HashMap::new(),
        }
    }

    /// Register a schema and create its unique indexes
    ///
    /// Registering the same collection again replaces the previous schema.
    #[instrument(skip(self, schema), fields(collection = %schema.collection()))]
    pub async fn register(&mut self, schema: Schema) -> Result<(), ApplicationError> {
        for field in schema.unique_fields() {
            self.store
                .ensure_unique_index(schema.collection(), field)
                .await?;
            debug!(field, "Unique index ensured");
        }

        info!("Schema registered");
        self.schemas.insert(schema.collection().to_string(), schema);
        Ok(())
    }

    /// Look up the schema of a collection
    pub fn schema(&self, collection: &str) -> Result<&Schema, ApplicationError> {
        self.schemas
            .get(collection)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection}")))
    }

    /// Names of all registered collections
    pub fn collections(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validate and insert a document
    #[instrument(skip(self, document))]
    pub async fn create(
        &self,
        collection: &str,
        document: &Document,
    ) -> Result<Document, ApplicationError> {
        let schema = self.schema(collection)?;
        let cast = schema.cast(document)?;
        self.store.insert(collection, cast).await
    }

    /// Fetch a document by its hex identifier
    ///
    /// A malformed identifier is a cast failure on `_id`.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, collection: &str, id: &str) -> Result<Document, ApplicationError> {
        self.schema(collection)?;
        let object_id = ObjectId::parse(id)
            .map_err(|_| RawError::cast(ID_FIELD, Value::String(id.to_string()), "ObjectId"))?;

        self.store
            .find_by_id(collection, &object_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("{collection} {id}")))
    }

    /// List documents of a collection
    pub async fn list(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, ApplicationError> {
        self.schema(collection)?;
        self.store.list(collection, limit).await
    }
}

#[cfg(test)]
mod tests {
    use domain::{CAST_ERROR, FieldDefinition, FieldType, VALIDATION_ERROR};
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::ports::MockDocumentStorePort;

    fn user_schema() -> Schema {
        Schema::new(
            "users",
            vec![
                FieldDefinition::new("name", FieldType::String),
                FieldDefinition::new("email", FieldType::String)
                    .required("Email is required")
                    .unique(),
                FieldDefinition::new("age", FieldType::Number)
                    .required("Age must be at least 18")
                    .min(18.0, "Age must be at least 18"),
            ],
        )
        .unwrap()
    }

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    async fn service_with(mut store: MockDocumentStorePort) -> DocumentService {
        store
            .expect_ensure_unique_index()
            .with(eq("users"), eq("email"))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut service = DocumentService::new(Arc::new(store));
        service.register(user_schema()).await.unwrap();
        service
    }

    #[tokio::test]
    async fn register_creates_unique_indexes() {
        let service = service_with(MockDocumentStorePort::new()).await;
        assert_eq!(service.collections(), vec!["users"]);
    }

    #[tokio::test]
    async fn create_inserts_cast_document() {
        let mut store = MockDocumentStorePort::new();
        store
            .expect_insert()
            .withf(|collection, document| {
                collection == "users" && !document.contains_key("admin")
            })
            .times(1)
            .returning(|_, document| Ok(document));
        let service = service_with(store).await;

        let created = service
            .create(
                "users",
                &doc(json!({ "email": "j@x.com", "age": 30, "admin": true })),
            )
            .await
            .unwrap();
        assert_eq!(created["email"], json!("j@x.com"));
    }

    #[tokio::test]
    async fn create_invalid_document_never_reaches_store() {
        let mut store = MockDocumentStorePort::new();
        store.expect_insert().never();
        let service = service_with(store).await;

        let err = service
            .create("users", &doc(json!({ "name": "John" })))
            .await
            .unwrap_err();

        let raw = err.as_raw().unwrap();
        assert_eq!(raw.name, VALIDATION_ERROR);
        let keys: Vec<_> = raw.errors.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["email", "age"]);
    }

    #[tokio::test]
    async fn create_in_unknown_collection_is_not_found() {
        let service = service_with(MockDocumentStorePort::new()).await;
        let err = tokio_test::assert_err!(service.create("posts", &Document::new()).await);
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let mut store = MockDocumentStorePort::new();
        store.expect_insert().returning(|_, _| {
            Err(RawError::duplicate_key("app.users", "email", json!("j@x.com")).into())
        });
        let service = service_with(store).await;

        let err = service
            .create("users", &doc(json!({ "email": "j@x.com", "age": 30 })))
            .await
            .unwrap_err();
        assert_eq!(err.as_raw().unwrap().key_value.as_ref().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_id_is_cast_error() {
        let mut store = MockDocumentStorePort::new();
        store.expect_find_by_id().never();
        let service = service_with(store).await;

        let err = service.find_by_id("users", "abc").await.unwrap_err();
        let raw = err.as_raw().unwrap();
        assert_eq!(raw.name, CAST_ERROR);
        assert_eq!(raw.path.as_deref(), Some("_id"));
        assert_eq!(raw.value, Some(json!("abc")));
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let mut store = MockDocumentStorePort::new();
        store.expect_find_by_id().returning(|_, _| Ok(None));
        let service = service_with(store).await;

        let err = service
            .find_by_id("users", "507f1f77bcf86cd799439011")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_delegates_to_store() {
        let mut store = MockDocumentStorePort::new();
        store
            .expect_list()
            .with(eq("users"), eq(10usize))
            .returning(|_, _| Ok(vec![Document::new()]));
        let service = service_with(store).await;

        assert_eq!(service.list("users", 10).await.unwrap().len(), 1);
    }
}

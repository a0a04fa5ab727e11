//! In-memory document store implementation

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::storage::{
    assign_id, document_id, json_eq, validate_identifier, Document, DocumentStore, Query, ID_FIELD,
};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<Document>,
    unique_fields: HashSet<String>,
}

impl Collection {
    fn conflicting_field(&self, document: &Document) -> Option<String> {
        let id_taken = |id: &str| {
            self.documents
                .iter()
                .any(|existing| document_id(existing) == Some(id))
        };

        if let Some(id) = document_id(document) {
            if id_taken(id) {
                return Some(ID_FIELD.to_string());
            }
        }

        self.unique_fields
            .iter()
            .find(|field| match document.get(field.as_str()) {
                Some(value) => self.documents.iter().any(|existing| {
                    existing
                        .get(field.as_str())
                        .is_some_and(|other| json_eq(other, value))
                }),
                None => false,
            })
            .cloned()
    }
}

/// Thread-safe in-memory document store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_one(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<Document>, DomainError> {
        let collections = self.collections.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collections.get(collection).and_then(|c| {
            c.documents
                .iter()
                .find(|document| query.matches(document))
                .cloned()
        }))
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, DomainError> {
        let collections = self.collections.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collections
            .get(collection)
            .map(|c| {
                c.documents
                    .iter()
                    .filter(|document| query.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, DomainError> {
        validate_identifier(collection)?;
        let id = assign_id(&mut document)?;

        let mut collections = self.collections.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let target = collections.entry(collection.to_string()).or_default();

        if let Some(field) = target.conflicting_field(&document) {
            return Err(DomainError::conflict(format!(
                "A document in '{}' already has this '{}'",
                collection, field
            )));
        }

        target.documents.push(document);
        debug!(collection, id = %id, "Inserted document");

        Ok(id)
    }

    async fn ensure_unique(&self, collection: &str, field: &str) -> Result<(), DomainError> {
        validate_identifier(collection)?;
        validate_identifier(field)?;

        let mut collections = self.collections.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let target = collections.entry(collection.to_string()).or_default();

        if target.unique_fields.contains(field) {
            return Ok(());
        }

        let mut seen = HashSet::new();
        for value in target.documents.iter().filter_map(|d| d.get(field)) {
            if !seen.insert(value.to_string()) {
                return Err(DomainError::conflict(format!(
                    "Existing documents in '{}' share a '{}' value",
                    collection, field
                )));
            }
        }

        target.unique_fields.insert(field.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_one() {
        let store = InMemoryDocumentStore::new();

        store
            .insert("users", doc(json!({"_id": "1", "email": "a@example.com"})))
            .await
            .unwrap();

        let found = store
            .find_one("users", &Query::by("email", "a@example.com"))
            .await
            .unwrap();
        assert_eq!(found.as_ref().and_then(document_id), Some("1"));

        let missing = store
            .find_one("users", &Query::by("email", "b@example.com"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_one_unknown_collection() {
        let store = InMemoryDocumentStore::new();

        let found = store.find_one("nothing", &Query::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_generates_id() {
        let store = InMemoryDocumentStore::new();

        let id = store
            .insert("alerts", doc(json!({"user_email": "a@example.com"})))
            .await
            .unwrap();
        assert_eq!(id.len(), 32);

        let found = store.find_one("alerts", &Query::by("_id", id.clone())).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let store = InMemoryDocumentStore::new();

        store.insert("users", doc(json!({"_id": "1"}))).await.unwrap();
        let result = store.insert("users", doc(json!({"_id": "1"}))).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_returns_matches_in_insertion_order() {
        let store = InMemoryDocumentStore::new();

        for (id, email) in [("1", "a@example.com"), ("2", "b@example.com"), ("3", "a@example.com")] {
            store
                .insert("alerts", doc(json!({"_id": id, "user_email": email})))
                .await
                .unwrap();
        }

        let found = store
            .find("alerts", &Query::by("user_email", "a@example.com"))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().filter_map(document_id).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let all = store.find("alerts", &Query::new()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_unique_field_rejects_duplicates() {
        let store = InMemoryDocumentStore::new();
        store.ensure_unique("users", "email").await.unwrap();

        store
            .insert("users", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();
        let result = store
            .insert("users", doc(json!({"email": "a@example.com"})))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(store.find("users", &Query::new()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_unique_is_idempotent() {
        let store = InMemoryDocumentStore::new();

        store.ensure_unique("users", "email").await.unwrap();
        store.ensure_unique("users", "email").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_unique_fails_on_existing_duplicates() {
        let store = InMemoryDocumentStore::new();

        store
            .insert("users", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();
        store
            .insert("users", doc(json!({"email": "a@example.com"})))
            .await
            .unwrap();

        let result = store.ensure_unique("users", "email").await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_invalid_collection_name() {
        let store = InMemoryDocumentStore::new();

        let result = store.insert("bad name", Document::new()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_non_string_id_is_rejected() {
        let store = InMemoryDocumentStore::new();

        let result = store
            .insert("users", doc(json!({"_id": 42, "email": "a@example.com"})))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let stored = store.find("users", &Query::new()).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_find_matches_whole_values_only() {
        let store = InMemoryDocumentStore::new();

        store
            .insert("alerts", doc(json!({"_id": "1", "tags": ["a", "b"], "limit": 10})))
            .await
            .unwrap();

        let superset = store
            .find("alerts", &Query::by("tags", json!(["a"])))
            .await
            .unwrap();
        assert!(superset.is_empty());

        let exact = store
            .find("alerts", &Query::by("tags", json!(["a", "b"])))
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);

        let numeric = store.find("alerts", &Query::by("limit", 10.0)).await.unwrap();
        assert_eq!(numeric.len(), 1);
    }
}

//! Document store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::document::{Document, Query};

/// Key-document store organised in named collections
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Returns the first document in the collection matching the query
    async fn find_one(&self, collection: &str, query: &Query)
        -> Result<Option<Document>, DomainError>;

    /// Returns every document in the collection matching the query, in insertion order
    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, DomainError>;

    /// Inserts a document and returns its `_id`
    ///
    /// An `_id` is generated when the document has none. Fails with
    /// `DomainError::Conflict` if the `_id` or any unique field value is taken.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, DomainError>;

    /// Declares a field whose values must be unique within the collection
    async fn ensure_unique(&self, collection: &str, field: &str) -> Result<(), DomainError>;
}

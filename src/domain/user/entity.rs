//! User entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{from_document, to_document, Document};
use crate::domain::DomainError;

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// Field users are looked up by
pub const EMAIL_FIELD: &str = "email";

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier (UUIDv4 as 32 hex characters)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user account as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    id: UserId,
    email: String,
    /// Password hash, never the plaintext
    password: String,
}

impl User {
    /// Create a user with a freshly generated ID
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_id(UserId::generate(), email, password)
    }

    /// Create a user with a known ID
    pub fn with_id(id: UserId, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Stored form: `{ "_id", "email", "password" }`
    pub fn to_document(&self) -> Result<Document, DomainError> {
        to_document(self)
    }

    pub fn from_document(document: Document) -> Result<Self, DomainError> {
        from_document(document)
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<User {}>", self.email)
    }
}

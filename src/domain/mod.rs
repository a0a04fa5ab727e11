//! Domain layer - accounts, alerts and the storage abstraction

pub mod alert;
pub mod error;
pub mod storage;
pub mod user;

pub use alert::{Alert, AlertRepository};
pub use error::DomainError;
pub use storage::{Document, DocumentStore, Query};
pub use user::{User, UserError, UserId};

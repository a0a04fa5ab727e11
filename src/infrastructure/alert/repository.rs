//! Document-store backed alert repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::alert::{Alert, AlertRepository, ALERTS_COLLECTION, USER_EMAIL_FIELD};
use crate::domain::storage::{from_document, to_document, DocumentStore, Query};
use crate::domain::DomainError;

/// AlertRepository over the `alerts` collection of a document store
#[derive(Debug, Clone)]
pub struct DocumentAlertRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentAlertRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AlertRepository for DocumentAlertRepository {
    async fn find_by_user_email(&self, email: &str) -> Result<Vec<Alert>, DomainError> {
        self.store
            .find(ALERTS_COLLECTION, &Query::by(USER_EMAIL_FIELD, email))
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    async fn create(&self, alert: Alert) -> Result<Alert, DomainError> {
        self.store
            .insert(ALERTS_COLLECTION, to_document(&alert)?)
            .await?;
        Ok(alert)
    }
}

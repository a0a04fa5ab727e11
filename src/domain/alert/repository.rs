//! Alert repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Alert;
use crate::domain::DomainError;

/// Repository trait for alert storage
#[async_trait]
pub trait AlertRepository: Send + Sync + Debug {
    /// All alerts owned by the given email, possibly none
    async fn find_by_user_email(&self, email: &str) -> Result<Vec<Alert>, DomainError>;

    /// Persist a new alert
    async fn create(&self, alert: Alert) -> Result<Alert, DomainError>;
}

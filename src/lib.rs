//! Alert Accounts
//!
//! User accounts for the price alert service:
//! - Registration with email uniqueness and format checks
//! - Login validation against Argon2-hashed passwords
//! - Lookup of the alerts a user owns
//! - Pluggable document storage (in-memory or PostgreSQL)

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use crate::infrastructure::{
    alert::DocumentAlertRepository,
    storage::{StorageConfig, StorageFactory},
    user::{Argon2Hasher, UserService},
};
use tracing::info;

/// Build the user service with the configured storage backend
pub async fn create_user_service(config: &AppConfig) -> anyhow::Result<UserService> {
    let storage_config = StorageConfig::from_settings(&config.storage)?;
    info!(storage = ?storage_config.storage_type(), "Initializing storage");

    let store = StorageFactory::create(&storage_config).await?;
    let alerts = Arc::new(DocumentAlertRepository::new(store.clone()));
    let service = UserService::new(store, Arc::new(Argon2Hasher::new()), alerts);

    service.init().await?;

    Ok(service)
}

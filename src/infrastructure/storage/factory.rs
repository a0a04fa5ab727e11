//! Storage factory for runtime storage selection

use std::sync::Arc;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::storage::DocumentStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryDocumentStore;
use super::postgres::{PostgresConfig, PostgresDocumentStore};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Builds the storage configuration from application settings
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        match settings.backend {
            StorageBackend::Memory => Ok(Self::InMemory),
            StorageBackend::Postgres => {
                let url = settings.url.as_deref().ok_or_else(|| {
                    DomainError::configuration("storage.url is required for the postgres backend")
                })?;

                Ok(Self::Postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(settings.max_connections)
                        .with_min_connections(settings.min_connections)
                        .with_connect_timeout(settings.connect_timeout_secs)
                        .with_table_prefix(settings.table_prefix.clone()),
                ))
            }
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating document stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a document store based on the configuration
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn DocumentStore>, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryDocumentStore::new())),
            StorageConfig::Postgres(pg_config) => {
                Ok(Arc::new(PostgresDocumentStore::connect(pg_config).await?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_types() {
        assert_eq!(StorageConfig::in_memory().storage_type(), StorageType::InMemory);

        let postgres = StorageConfig::Postgres(PostgresConfig::new("postgres://localhost/test"));
        assert_eq!(postgres.storage_type(), StorageType::Postgres);
    }

    #[test]
    fn test_from_settings_memory() {
        let settings = StorageSettings::default();
        let config = StorageConfig::from_settings(&settings).unwrap();
        assert_eq!(config.storage_type(), StorageType::InMemory);
    }

    #[test]
    fn test_from_settings_postgres() {
        let settings = StorageSettings {
            backend: StorageBackend::Postgres,
            url: Some("postgres://localhost/test".to_string()),
            max_connections: 4,
            ..StorageSettings::default()
        };

        match StorageConfig::from_settings(&settings).unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://localhost/test");
                assert_eq!(pg.max_connections, 4);
            }
            other => panic!("Expected Postgres config, got {:?}", other),
        }
    }

    #[test]
    fn test_from_settings_postgres_requires_url() {
        let settings = StorageSettings {
            backend: StorageBackend::Postgres,
            ..StorageSettings::default()
        };

        let result = StorageConfig::from_settings(&settings);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_create_in_memory() {
        let store = StorageFactory::create(&StorageConfig::in_memory()).await.unwrap();
        let found = store
            .find_one("users", &crate::domain::Query::new())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}

//! PostgreSQL document store with connection pooling

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::{debug, info};

use crate::domain::storage::{assign_id, validate_identifier, Document, DocumentStore, Query};
use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Prefix prepended to collection names to form table names
    pub table_prefix: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/alert_accounts".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            table_prefix: "doc_".to_string(),
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }
}

/// Document store backed by PostgreSQL
///
/// Each collection is a table of `(id, data JSONB, created_at)` rows, created
/// on first use. Queries compare each field with `jsonb` equality and unique
/// fields are backed by unique expression indexes on `data->>'field'`.
pub struct PostgresDocumentStore {
    pool: PgPool,
    table_prefix: String,
    ready_tables: Mutex<HashSet<String>>,
}

impl Debug for PostgresDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDocumentStore")
            .field("table_prefix", &self.table_prefix)
            .finish()
    }
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool, table_prefix: impl Into<String>) -> Self {
        Self {
            pool,
            table_prefix: table_prefix.into(),
            ready_tables: Mutex::new(HashSet::new()),
        }
    }

    /// Creates a store with its own connection pool
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        validate_identifier(&config.table_prefix)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        info!(max_connections = config.max_connections, "Connected to PostgreSQL");

        Ok(Self::new(pool, config.table_prefix.clone()))
    }

    fn table_name(&self, collection: &str) -> Result<String, DomainError> {
        validate_identifier(collection)?;
        Ok(format!("{}{}", self.table_prefix, collection))
    }

    fn is_ready(&self, table: &str) -> Result<bool, DomainError> {
        let ready = self
            .ready_tables
            .lock()
            .map_err(|e| DomainError::storage(format!("Failed to acquire lock: {}", e)))?;
        Ok(ready.contains(table))
    }

    /// Ensures the collection table exists and returns its name
    async fn ensure_table(&self, collection: &str) -> Result<String, DomainError> {
        let table = self.table_name(collection)?;

        if self.is_ready(&table)? {
            return Ok(table);
        }

        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id VARCHAR(255) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            table
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        self.ready_tables
            .lock()
            .map_err(|e| DomainError::storage(format!("Failed to acquire lock: {}", e)))?
            .insert(table.clone());

        debug!(table = %table, "Collection table ready");
        Ok(table)
    }
}

fn row_document(row: &sqlx::postgres::PgRow) -> Result<Document, DomainError> {
    match row.try_get::<Value, _>("data") {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DomainError::storage(format!(
            "Stored document is not an object: {}",
            other
        ))),
        Err(e) => Err(DomainError::storage(format!("Failed to read document: {}", e))),
    }
}

/// Build the `WHERE` predicate for a query, one `data -> key = value` pair
/// per field. Placeholders are numbered in `Query::fields` order.
fn where_clause(query: &Query) -> String {
    if query.fields().is_empty() {
        return "TRUE".to_string();
    }

    (0..query.fields().len())
        .map(|i| format!("data -> ${}::text = ${}::jsonb", 2 * i + 1, 2 * i + 2))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn find_one(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Option<Document>, DomainError> {
        let table = self.ensure_table(collection).await?;
        let sql = format!(
            "SELECT data FROM {} WHERE {} ORDER BY created_at LIMIT 1",
            table,
            where_clause(query)
        );

        let mut statement = sqlx::query(&sql);
        for (field, value) in query.fields() {
            statement = statement.bind(field.clone()).bind(value.clone());
        }

        let row = statement
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find document: {}", e)))?;

        row.as_ref().map(row_document).transpose()
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, DomainError> {
        let table = self.ensure_table(collection).await?;
        let sql = format!(
            "SELECT data FROM {} WHERE {} ORDER BY created_at",
            table,
            where_clause(query)
        );

        let mut statement = sqlx::query(&sql);
        for (field, value) in query.fields() {
            statement = statement.bind(field.clone()).bind(value.clone());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find documents: {}", e)))?;

        rows.iter().map(row_document).collect()
    }

    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, DomainError> {
        let id = assign_id(&mut document)?;
        let table = self.ensure_table(collection).await?;

        let sql = format!("INSERT INTO {} (id, data) VALUES ($1, $2)", table);

        sqlx::query(&sql)
            .bind(&id)
            .bind(Value::Object(document))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::conflict(format!(
                        "A document in '{}' conflicts with an existing one",
                        collection
                    ))
                } else {
                    DomainError::storage(format!("Failed to insert document: {}", e))
                }
            })?;

        debug!(collection, id = %id, "Inserted document");
        Ok(id)
    }

    async fn ensure_unique(&self, collection: &str, field: &str) -> Result<(), DomainError> {
        validate_identifier(field)?;
        let table = self.ensure_table(collection).await?;

        let sql = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {table}_{field}_key ON {table} ((data->>'{field}'))",
            table = table,
            field = field
        );

        sqlx::query(&sql).execute(&self.pool).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!(
                    "Existing documents in '{}' share a '{}' value",
                    collection, field
                ))
            } else {
                DomainError::storage(format!("Failed to create unique index: {}", e))
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.table_prefix, "doc_");
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/test")
            .with_max_connections(20)
            .with_min_connections(5)
            .with_connect_timeout(60)
            .with_table_prefix("acct_");

        assert_eq!(config.url, "postgres://localhost/test");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 5);
        assert_eq!(config.connect_timeout_secs, 60);
        assert_eq!(config.table_prefix, "acct_");
    }

    #[test]
    fn test_where_clause() {
        assert_eq!(where_clause(&Query::new()), "TRUE");
        assert_eq!(
            where_clause(&Query::by("email", "a@example.com")),
            "data -> $1::text = $2::jsonb"
        );
        assert_eq!(
            where_clause(&Query::by("user_email", "a@example.com").and("active", true)),
            "data -> $1::text = $2::jsonb AND data -> $3::text = $4::jsonb"
        );
    }

    #[tokio::test]
    async fn test_table_names_are_validated() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/test")
            .unwrap();
        let store = PostgresDocumentStore::new(pool, "doc_");

        assert_eq!(store.table_name("users").unwrap(), "doc_users");
        assert!(store.table_name("users; DROP TABLE x").is_err());
    }
}

//! CLI module for Alert Accounts
//!
//! Provides subcommands operating on the configured account store:
//! - `register`: create an account
//! - `login`: check an email/password pair
//! - `alerts`: list the alerts a user owns

pub mod alerts;
pub mod login;
pub mod register;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, StorageBackend};
use crate::domain::DomainError;
use crate::infrastructure::logging;
use crate::infrastructure::user::UserService;

/// Alert Accounts - user registration and login for the price alert service
#[derive(Parser)]
#[command(name = "alert-accounts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new account
    Register(CredentialArgs),

    /// Check login credentials
    Login(CredentialArgs),

    /// List the alerts owned by a user
    Alerts(alerts::AlertsArgs),
}

/// Email and plaintext password; the password is pre-hashed before use
#[derive(Args, Clone)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

/// Load `.env` and configuration, start logging and build the service
async fn bootstrap() -> anyhow::Result<UserService> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);
    require_persistent_storage(&config)?;

    crate::create_user_service(&config).await
}

/// Each CLI run is a fresh process, so an in-memory store would lose every
/// account as soon as the command exits.
fn require_persistent_storage(config: &AppConfig) -> Result<(), DomainError> {
    match config.storage.backend {
        StorageBackend::Postgres => Ok(()),
        StorageBackend::Memory => Err(DomainError::configuration(
            "the CLI needs persistent storage; set APP__STORAGE__BACKEND=postgres and APP__STORAGE__URL",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_is_refused() {
        let config = AppConfig::default();

        let result = require_persistent_storage(&config);
        match result {
            Err(DomainError::Configuration { message }) => {
                assert!(message.contains("APP__STORAGE__BACKEND=postgres"))
            }
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_postgres_backend_is_accepted() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Postgres;
        config.storage.url = Some("postgres://localhost/alert_accounts".to_string());

        assert!(require_persistent_storage(&config).is_ok());
    }
}

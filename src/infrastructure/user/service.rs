//! User service for registration, login and alert lookup

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::alert::{Alert, AlertRepository};
use crate::domain::storage::{DocumentStore, Query};
use crate::domain::user::{email_is_valid, User, UserError, EMAIL_FIELD, USERS_COLLECTION};

use super::password::PasswordHasher;

/// Account operations over injected storage, hashing and alert collaborators
#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<dyn DocumentStore>,
    hasher: Arc<dyn PasswordHasher>,
    alerts: Arc<dyn AlertRepository>,
}

impl UserService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        hasher: Arc<dyn PasswordHasher>,
        alerts: Arc<dyn AlertRepository>,
    ) -> Self {
        Self {
            store,
            hasher,
            alerts,
        }
    }

    /// Declare the storage-level uniqueness of user emails
    pub async fn init(&self) -> Result<(), UserError> {
        self.store
            .ensure_unique(USERS_COLLECTION, EMAIL_FIELD)
            .await?;
        Ok(())
    }

    async fn lookup(&self, email: &str) -> Result<Option<User>, UserError> {
        let document = self
            .store
            .find_one(USERS_COLLECTION, &Query::by(EMAIL_FIELD, email))
            .await?;

        Ok(document.map(User::from_document).transpose()?)
    }

    /// Register a new account
    ///
    /// `password_hash` is the caller's pre-hashed password; it is hashed
    /// again before being stored.
    #[instrument(skip(self, password_hash))]
    pub async fn register_user(&self, email: &str, password_hash: &str) -> Result<User, UserError> {
        if self.lookup(email).await?.is_some() {
            warn!("Registration attempted for an existing email");
            return Err(UserError::UserAlreadyRegistered);
        }

        if !email_is_valid(email) {
            return Err(UserError::InvalidEmail);
        }

        let user = User::new(email, self.hasher.hash(password_hash)?);
        self.save(&user).await?;

        info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    /// Check an email / pre-hashed password pair
    #[instrument(skip(self, password_hash))]
    pub async fn is_login_valid(&self, email: &str, password_hash: &str) -> Result<bool, UserError> {
        let user = self.lookup(email).await?.ok_or(UserError::UserNotExists)?;

        if !self.hasher.verify(password_hash, user.password()) {
            debug!(user_id = %user.id(), "Password mismatch");
            return Err(UserError::IncorrectPassword);
        }

        Ok(true)
    }

    /// Fetch the account registered under `email`
    pub async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        self.lookup(email)
            .await?
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    /// Insert the user document; a taken email surfaces as `UserAlreadyRegistered`
    pub async fn save(&self, user: &User) -> Result<(), UserError> {
        match self
            .store
            .insert(USERS_COLLECTION, user.to_document()?)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_conflict() => Err(UserError::UserAlreadyRegistered),
            Err(e) => Err(e.into()),
        }
    }

    /// Alerts owned by the user, possibly none
    pub async fn get_alerts(&self, user: &User) -> Result<Vec<Alert>, UserError> {
        Ok(self.alerts.find_by_user_email(user.email()).await?)
    }
}

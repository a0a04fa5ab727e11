//! Alert entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collection holding alert documents
pub const ALERTS_COLLECTION: &str = "alerts";

/// Field linking an alert to its owner
pub const USER_EMAIL_FIELD: &str = "user_email";

/// Opaque alert identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A price alert owned by a user, identified by the user's email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "_id")]
    id: AlertId,
    user_email: String,
    item_id: String,
    price_limit: f64,
    #[serde(default = "default_active")]
    active: bool,
    last_checked: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Alert {
    /// Create an active alert, checked as of now
    pub fn new(user_email: impl Into<String>, item_id: impl Into<String>, price_limit: f64) -> Self {
        Self {
            id: AlertId::generate(),
            user_email: user_email.into(),
            item_id: item_id.into(),
            price_limit,
            active: true,
            last_checked: Utc::now(),
        }
    }

    pub fn id(&self) -> &AlertId {
        &self.id
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn price_limit(&self) -> f64 {
        self.price_limit
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_checked(&self) -> DateTime<Utc> {
        self.last_checked
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

//! User domain
//!
//! Account entity, the typed failures of the account operations and
//! email validation.

mod entity;
mod error;
mod validation;

pub use entity::{User, UserId, EMAIL_FIELD, USERS_COLLECTION};
pub use error::UserError;
pub use validation::email_is_valid;

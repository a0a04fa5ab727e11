use thiserror::Error;

use crate::domain::DomainError;

/// Failures of the account operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Your user does not exist.")]
    UserNotExists,

    #[error("Your password was wrong.")]
    IncorrectPassword,

    #[error("The email you used to register already exists.")]
    UserAlreadyRegistered,

    #[error("The email does not have the right format.")]
    InvalidEmail,

    #[error("No user registered with email '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

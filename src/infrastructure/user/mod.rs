//! User infrastructure module
//!
//! Password hashing with Argon2, the client-side SHA-512 pre-hash and the
//! user service that ties the account operations to storage.

mod password;
mod service;

pub use password::{prehash_password, Argon2Hasher, PasswordHasher};
pub use service::UserService;

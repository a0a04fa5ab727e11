//! Infrastructure layer - storage backends, hashing and services

pub mod alert;
pub mod logging;
pub mod storage;
pub mod user;

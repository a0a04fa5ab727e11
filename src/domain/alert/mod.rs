//! Alert domain

mod entity;
mod repository;

pub use entity::{Alert, AlertId, ALERTS_COLLECTION, USER_EMAIL_FIELD};
pub use repository::AlertRepository;

#[cfg(test)]
pub use repository::mock::MockAlertRepository;

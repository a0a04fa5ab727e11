//! Alert infrastructure module

mod repository;

pub use repository::DocumentAlertRepository;

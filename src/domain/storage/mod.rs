//! Storage domain - document store abstraction

mod document;
mod repository;

pub use document::{
    assign_id, document_id, from_document, json_eq, to_document, validate_identifier, Document,
    Query, ID_FIELD,
};
pub use repository::DocumentStore;

#[cfg(test)]
pub use repository::mock;

//! Documents, queries and collection naming

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::DomainError;

/// Name of the primary key field carried by every stored document
pub const ID_FIELD: &str = "_id";

/// A stored record: a JSON object with named fields
pub type Document = Map<String, Value>;

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Validate a collection or field name
///
/// Names end up as table and index identifiers in SQL backends, so only
/// ASCII letters, digits and underscores are accepted (no leading digit).
pub fn validate_identifier(name: &str) -> Result<(), DomainError> {
    if IDENTIFIER_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "'{}' is not a valid collection or field name",
            name
        )))
    }
}

/// Serialize a value into a document
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, DomainError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DomainError::storage(format!(
            "Expected a JSON object, got {}",
            other
        ))),
        Err(e) => Err(DomainError::storage(format!(
            "Failed to serialize document: {}",
            e
        ))),
    }
}

/// Deserialize a document into a value
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, DomainError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|e| DomainError::storage(format!("Failed to deserialize document: {}", e)))
}

/// Read the `_id` of a document, if it has a string one
pub fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

/// Return the document's `_id`, generating one when the field is absent
///
/// A present `_id` that is not a string is rejected.
pub fn assign_id(document: &mut Document) -> Result<String, DomainError> {
    match document.get(ID_FIELD) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) => Err(DomainError::validation(format!(
            "'{}' must be a string, got {}",
            ID_FIELD, other
        ))),
        None => {
            let id = Uuid::new_v4().simple().to_string();
            document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            Ok(id)
        }
    }
}

/// JSON equality with numbers compared by value (`10` equals `10.0`)
///
/// Same semantics as PostgreSQL `jsonb` equality.
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}

/// Exact-match filter over named document fields
///
/// A document matches when every field in the query is present in the
/// document with an equal value (see [`json_eq`]). Arrays and objects must
/// match as a whole. The empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    fields: Map<String, Value>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single-field query
    pub fn by(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().and(field, value)
    }

    /// Add an equality condition
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Check the query against a document
    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| {
                document
                    .get(field)
                    .is_some_and(|actual| json_eq(actual, expected))
            })
    }
}

//! Field selection over serialized records

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::warn;

/// A record reduced to the requested fields, in the record's field order.
pub type Projected = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct FieldSet(HashSet<String>);

impl FieldSet {
    pub fn new<S: AsRef<str>>(base: &[&str], aux: &[S]) -> Self {
        Self(
            base.iter()
                .map(|field| field.to_string())
                .chain(aux.iter().map(|field| field.as_ref().to_string()))
                .collect(),
        )
    }

    pub fn insert(&mut self, field: &str) {
        self.0.insert(field.to_string());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    /// Keeps the fields of `record` named in the set. Names the record does
    /// not have are ignored.
    pub fn project<T: Serialize>(&self, record: &T) -> Projected {
        match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter(|(field, _)| self.contains(field))
                .collect(),
            Ok(other) => {
                warn!(kind = ?other, "Projected record is not an object");
                Map::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to serialize record for projection");
                Map::new()
            }
        }
    }
}

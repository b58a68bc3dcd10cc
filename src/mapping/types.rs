//! Field map types

use crate::types::{JsonObject, JsonValue};
use std::fmt;

/// Derives an output value from the whole source record
pub type DeriveFn = fn(&JsonValue) -> JsonValue;

/// How one output key gets its value
#[derive(Clone)]
pub enum FieldRule {
    /// Copy the value at a dotted source path (`user.email`)
    Path(String),
    /// Compute the value from the source record
    Derive(DeriveFn),
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRule::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FieldRule::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Ordered set of output-key rules
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: Vec<(String, FieldRule)>,
}

impl FieldMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `key` to the value at `path`
    #[must_use]
    pub fn path(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.fields.push((key.into(), FieldRule::Path(path.into())));
        self
    }

    /// Map `key` to a derived value
    #[must_use]
    pub fn derive(mut self, key: impl Into<String>, f: DeriveFn) -> Self {
        self.fields.push((key.into(), FieldRule::Derive(f)));
        self
    }

    /// Output keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the map has no rules
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Apply the rules to one source record; missing paths become null
    pub fn apply(&self, record: &JsonValue) -> JsonObject {
        self.fields
            .iter()
            .map(|(key, rule)| {
                let value = match rule {
                    FieldRule::Path(path) => get_path(record, path).cloned().unwrap_or_default(),
                    FieldRule::Derive(f) => f(record),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Get a value by dotted path; numeric segments index into arrays
pub fn get_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.').try_fold(value, |current, part| match current {
        JsonValue::Object(map) => map.get(part),
        JsonValue::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

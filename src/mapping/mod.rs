//! Field mapping
//!
//! Renames and derives fields from the upstream snake_case schema into the
//! camelCase records this crate returns.

mod maps;
mod types;

pub use maps::{course_map, enrollment_map, exam_map};
pub use types::{get_path, DeriveFn, FieldMap, FieldRule};

use crate::types::JsonValue;

/// Apply a field map to one record, or to every element of an array
///
/// Scalars and null pass through unchanged.
pub fn format_response(data: &JsonValue, map: &FieldMap) -> JsonValue {
    match data {
        JsonValue::Array(items) => items
            .iter()
            .map(|item| JsonValue::Object(map.apply(item)))
            .collect(),
        JsonValue::Object(_) => JsonValue::Object(map.apply(data)),
        other => other.clone(),
    }
}

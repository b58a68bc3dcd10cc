//! URL templating
//!
//! Handles `{name}` placeholder substitution in endpoint templates and
//! appends query parameters. Keys and scalar values are NOT URL-encoded;
//! callers pre-encode anything containing `&`, `=` or other URL-significant
//! characters.

use crate::types::{JsonObject, JsonValue};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Regex for matching path placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.+?)\}").unwrap());

/// Build a URL from a template, path parameters and query parameters
///
/// Placeholders without a matching key are left verbatim so a template can
/// be resolved in stages. A key that is present always substitutes, even
/// when its value is falsy (`0`, `""`, `false`).
///
/// Query pairs are appended in the given order, the first prefixed with `?`
/// and the rest with `&`. Composite values (objects, arrays) are embedded as
/// JSON text.
pub fn build_url<K, V>(template: &str, path_params: &JsonObject, query: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: std::borrow::Borrow<JsonValue>,
{
    let mut url = PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| match path_params.get(&caps[1]) {
            Some(value) => value_to_string(value),
            None => caps[0].to_string(),
        })
        .into_owned();

    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key.as_ref());
        url.push('=');
        url.push_str(&value_to_string(value.borrow()));
    }

    url
}

/// Check if a string still contains unresolved placeholders
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(s)
}

/// Extract all placeholder names from a template
pub fn extract_placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Convert a camelCase identifier to snake_case (`perPage` -> `per_page`)
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Snake-case a query key only when it is a plain camelCase identifier
///
/// Keys such as `include[]` or `already_snake` pass through unchanged.
pub fn query_key(key: &str) -> String {
    let plain = key.chars().all(|c| c.is_ascii_alphanumeric())
        && key.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    if plain {
        to_snake_case(key)
    } else {
        key.to_string()
    }
}

/// Convert a JSON value to a string for URL substitution
pub(crate) fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        // For complex types, use JSON serialization
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

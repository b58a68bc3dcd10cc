//! Pagination types
//!
//! Defines the link relations, the parsed pagination metadata and the
//! `{results, pagination}` envelope produced by every physical request.

use crate::types::JsonValue;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A named pagination link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    First,
    Prev,
    Next,
    Last,
    Current,
}

impl Relation {
    /// The `rel="..."` name
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::First => "first",
            Relation::Prev => "prev",
            Relation::Next => "next",
            Relation::Last => "last",
            Relation::Current => "current",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination metadata parsed from a response's link header
///
/// Empty when the response carried no link header (single-page resource).
/// `total_pages` is only known when a `last` link was present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Relation name -> absolute URL
    #[serde(flatten)]
    pub links: BTreeMap<String, String>,
    /// Page size, from the `last` link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Total page count, from the `last` link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Number of the page this response is, from the `current` link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl PaginationInfo {
    /// URL for a relation, if the response carried one
    pub fn get(&self, relation: Relation) -> Option<&str> {
        self.links.get(relation.as_str()).map(String::as_str)
    }

    /// Check if there is a page after this one
    pub fn has_next(&self) -> bool {
        self.get(Relation::Next).is_some()
    }

    /// Check if no pagination information was present
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Pages remaining from this one to the last, inclusive
    ///
    /// A resource without a `last` link counts as a single page.
    pub fn remaining_pages(&self) -> u32 {
        match (self.total_pages, self.page_number) {
            (Some(total), Some(page)) => total.saturating_sub(page) + 1,
            (Some(total), None) => total,
            (None, _) => 1,
        }
    }
}

/// Result of one physical request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Decoded response body (array or object)
    pub results: JsonValue,
    /// Pagination metadata from the response headers
    pub pagination: PaginationInfo,
}

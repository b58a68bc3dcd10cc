//! Per-call options

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Credential keys of a flat options object
const CREDENTIAL_KEYS: [&str; 5] = [
    "host",
    "clientId",
    "clientSecret",
    "accessToken",
    "refreshToken",
];

/// Pagination keys of a flat options object
const PAGINATION_KEYS: [&str; 2] = ["page", "perPage"];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    page: Option<u32>,
    per_page: Option<u32>,
}

/// Credentials, pagination and path parameters for one client call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOptions {
    /// Credentials for this call
    pub credentials: Credentials,
    /// Page to start from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Path parameters, e.g. `courseId`
    #[serde(default)]
    pub params: JsonObject,
}

impl CallOptions {
    /// Options with no pagination and no path parameters
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            page: None,
            per_page: None,
            params: JsonObject::new(),
        }
    }

    /// Start from this page
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Request this many records per page
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set a path parameter
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Split a flat options object into credentials, pagination and path
    /// parameters
    ///
    /// ```json
    /// {"host": "https://lms.example.com", "clientId": "...", "clientSecret": "...",
    ///  "accessToken": "...", "refreshToken": "...", "perPage": 50, "courseId": 4}
    /// ```
    ///
    /// Every key that is neither a credential nor a pagination key becomes a
    /// path parameter.
    pub fn from_json(value: JsonValue) -> Result<Self> {
        let JsonValue::Object(mut fields) = value else {
            return Err(Error::validation("options", "must be a JSON object"));
        };

        let credentials: Credentials =
            serde_json::from_value(JsonValue::Object(take(&mut fields, &CREDENTIAL_KEYS)))?;
        let pagination: Pagination =
            serde_json::from_value(JsonValue::Object(take(&mut fields, &PAGINATION_KEYS)))?;

        Ok(Self {
            credentials,
            page: pagination.page,
            per_page: pagination.per_page,
            params: fields,
        })
    }

    /// Pagination query in camelCase form, before key conversion
    pub(crate) fn pagination_query(&self) -> Vec<(&'static str, JsonValue)> {
        [("page", self.page), ("perPage", self.per_page)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, JsonValue::from(v))))
            .collect()
    }
}

fn take(fields: &mut JsonObject, keys: &[&str]) -> JsonObject {
    keys.iter()
        .filter_map(|key| fields.remove_entry(*key))
        .collect()
}

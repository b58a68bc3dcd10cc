//! Input validation
//!
//! Shape checks on call options, run before any request is issued.

use crate::auth::Credentials;
use crate::catalog::Endpoint;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use url::Url;

/// Validate credentials: absolute http(s) host and non-empty secrets
pub fn validate_credentials(credentials: &Credentials) -> Result<()> {
    let host = Url::parse(&credentials.host)
        .map_err(|e| Error::validation("host", format!("must be an absolute URL: {e}")))?;
    if !matches!(host.scheme(), "http" | "https") {
        return Err(Error::validation("host", "must use http or https"));
    }

    for (field, value) in [
        ("clientId", &credentials.client_id),
        ("clientSecret", &credentials.client_secret),
        ("accessToken", &credentials.access_token),
        ("refreshToken", &credentials.refresh_token),
    ] {
        if value.trim().is_empty() {
            return Err(Error::validation(field, "is required"));
        }
    }

    Ok(())
}

/// Validate optional pagination arguments: positive when given
pub fn validate_pagination(page: Option<u32>, per_page: Option<u32>) -> Result<()> {
    for (field, value) in [("page", page), ("perPage", per_page)] {
        if value == Some(0) {
            return Err(Error::validation(field, "must be a positive integer"));
        }
    }
    Ok(())
}

/// Validate that every path parameter the endpoint needs is supplied
///
/// Accepted values are positive integers, or non-empty strings (ids are
/// sometimes given as `sis_course_id:ABC`).
pub fn validate_params(endpoint: &Endpoint, params: &JsonObject) -> Result<()> {
    for name in endpoint.path_params() {
        match params.get(&name) {
            None | Some(JsonValue::Null) => {
                return Err(Error::validation(name, "is required"));
            }
            Some(JsonValue::Number(n)) if n.as_u64().is_some_and(|n| n > 0) => {}
            Some(JsonValue::String(s)) if !s.trim().is_empty() => {}
            Some(_) => {
                return Err(Error::validation(
                    name,
                    "must be a positive integer or a non-empty string",
                ));
            }
        }
    }
    Ok(())
}

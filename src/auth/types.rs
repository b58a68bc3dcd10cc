//! Credential and refresh-policy types

use crate::http::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message the upstream returns for an expired access token
pub const INVALID_ACCESS_TOKEN: &str = "Invalid access token.";

/// Legacy status line header sent alongside an expired-token 401
pub const UNAUTHORIZED_STATUS_LINE: &str = "401 Unauthorized";

/// Credentials for one logical operation
///
/// Only `access_token` is ever rewritten, and only by the requester that
/// owns this value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// LMS host, e.g. `https://school.instructure.com`
    pub host: String,
    /// OAuth2 client ID
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Current access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(
        host: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

/// Decides which failures are recoverable by refreshing the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthorizedPolicy {
    /// Status 401 and the expired-token message
    #[default]
    Lenient,
    /// Status 401, the expired-token message and the `401 Unauthorized`
    /// status line header
    Strict,
}

impl UnauthorizedPolicy {
    /// Check if a transport failure should trigger a token refresh
    pub fn is_refresh_eligible(&self, err: &TransportError) -> bool {
        let expired = err.status == Some(401)
            && err.message.as_deref() == Some(INVALID_ACCESS_TOKEN);

        match self {
            UnauthorizedPolicy::Lenient => expired,
            UnauthorizedPolicy::Strict => {
                expired && err.status_line.as_deref() == Some(UNAUTHORIZED_STATUS_LINE)
            }
        }
    }
}

/// Receives every refreshed access token, e.g. to persist it
///
/// The requester awaits the call before it retries the original request;
/// an error aborts the operation.
#[async_trait]
pub trait AccessTokenListener: Send + Sync {
    /// Called with the new access token after a successful refresh
    async fn on_refresh(&self, access_token: &str) -> anyhow::Result<()>;
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
}

#[cfg(test)]
mod type_tests {
    use super::*;
    use serde_json::json;

    fn expired() -> TransportError {
        TransportError::http(401, json!({"errors": [{"message": INVALID_ACCESS_TOKEN}]}))
    }

    #[test]
    fn test_lenient_policy() {
        let policy = UnauthorizedPolicy::Lenient;
        assert!(policy.is_refresh_eligible(&expired()));
        assert!(policy.is_refresh_eligible(&expired().with_status_line(UNAUTHORIZED_STATUS_LINE)));

        // Bad credentials from the start are not refreshable
        let other = TransportError::http(401, json!({"errors": [{"message": "user not authorized"}]}));
        assert!(!policy.is_refresh_eligible(&other));

        let forbidden = TransportError::http(403, json!({"errors": [{"message": INVALID_ACCESS_TOKEN}]}));
        assert!(!policy.is_refresh_eligible(&forbidden));

        assert!(!policy.is_refresh_eligible(&TransportError::connection("reset")));
    }

    #[test]
    fn test_strict_policy_requires_status_line() {
        let policy = UnauthorizedPolicy::Strict;
        assert!(!policy.is_refresh_eligible(&expired()));
        assert!(policy.is_refresh_eligible(&expired().with_status_line(UNAUTHORIZED_STATUS_LINE)));
        assert!(!policy.is_refresh_eligible(&expired().with_status_line("403 Forbidden")));
    }

    #[test]
    fn test_policy_default_and_serde() {
        assert_eq!(UnauthorizedPolicy::default(), UnauthorizedPolicy::Lenient);
        let policy: UnauthorizedPolicy = serde_json::from_value(json!("strict")).unwrap();
        assert_eq!(policy, UnauthorizedPolicy::Strict);
    }

    #[test]
    fn test_credentials_camel_case_and_redacted_debug() {
        let creds: Credentials = serde_json::from_value(json!({
            "host": "https://h",
            "clientId": "id",
            "clientSecret": "secret",
            "accessToken": "access",
            "refreshToken": "refresh"
        }))
        .unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.refresh_token, "refresh");

        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("access\""));
    }
}

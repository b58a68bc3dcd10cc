//! Authenticated requester
//!
//! Sends one request with a bearer token. When the token has expired it
//! exchanges the refresh token for a new access token exactly once and
//! resends the original request.

use super::types::{AccessTokenListener, Credentials, TokenResponse, UnauthorizedPolicy};
use crate::error::{Error, Result};
use crate::http::{RawRequest, RawResponse, Transport, TransportError};
use crate::pagination::{parse_pagination, ResponseEnvelope};
use crate::template::{build_url, query_key};
use crate::types::{JsonObject, JsonValue, Method, QueryParams, RequestOptions};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Token endpoint, relative to the credentials host
pub const REFRESH_TOKEN_PATH: &str = "/login/oauth2/token";

/// Sends authenticated requests on behalf of one set of credentials
///
/// `request` takes `&mut self`: a requester serves one in-flight logical
/// operation at a time, so a refresh can never race a request that still
/// carries the stale token.
pub struct Requester {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    policy: UnauthorizedPolicy,
    listener: Option<Arc<dyn AccessTokenListener>>,
}

impl Requester {
    /// Create a requester with the default refresh policy
    pub fn new(transport: Arc<dyn Transport>, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            policy: UnauthorizedPolicy::default(),
            listener: None,
        }
    }

    /// Set the refresh policy
    #[must_use]
    pub fn with_policy(mut self, policy: UnauthorizedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set a listener notified of refreshed access tokens
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn AccessTokenListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Current credentials (reflects any refresh)
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send a request, refreshing the access token once if it has expired
    pub async fn request(&mut self, options: &RequestOptions) -> Result<ResponseEnvelope> {
        let response = match self.send(options).await {
            Ok(response) => response,
            Err(err) if self.policy.is_refresh_eligible(&err) => {
                warn!("Access token rejected for {} {}", options.method, options.url);
                self.refresh_access_token().await?;
                self.send(options).await?
            }
            Err(err) => return Err(err.into()),
        };

        format_response(response)
    }

    async fn send(
        &self,
        options: &RequestOptions,
    ) -> std::result::Result<RawResponse, TransportError> {
        debug!("Sending {} {}", options.method, options.url);
        let request =
            RawRequest::new(options.method, &options.url).bearer(&self.credentials.access_token);
        self.transport.send(request).await
    }

    /// Exchange the refresh token for a new access token
    async fn refresh_access_token(&mut self) -> Result<()> {
        let creds = &self.credentials;
        let query: QueryParams = [
            ("clientId", &creds.client_id),
            ("clientSecret", &creds.client_secret),
            ("refreshToken", &creds.refresh_token),
            ("grantType", &"refresh_token".to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (query_key(key), JsonValue::String(value.clone())))
        .collect();

        let template = format!("{}{REFRESH_TOKEN_PATH}", creds.host.trim_end_matches('/'));
        let url = build_url(&template, &JsonObject::new(), &query);

        let response = self
            .transport
            .send(RawRequest::new(Method::POST, url))
            .await
            .map_err(|e| Error::token_refresh(e.to_string()))?;

        let token: TokenResponse = serde_json::from_value(response.body)
            .map_err(|e| Error::token_refresh(format!("unexpected token response: {e}")))?;

        self.credentials.access_token = token.access_token;
        info!("Access token refreshed for {}", self.credentials.host);

        if let Some(listener) = &self.listener {
            listener
                .on_refresh(&self.credentials.access_token)
                .await
                .map_err(Error::TokenPersist)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requester")
            .field("credentials", &self.credentials)
            .field("policy", &self.policy)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

/// Wrap a raw response into a `{results, pagination}` envelope
fn format_response(response: RawResponse) -> Result<ResponseEnvelope> {
    let pagination = parse_pagination(&response.headers)?;
    Ok(ResponseEnvelope {
        results: response.body,
        pagination,
    })
}

//! Scripted in-memory transport for unit tests

use super::{RawRequest, RawResponse, Transport, TransportError};
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, LINK};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

type Outcome = Result<RawResponse, TransportError>;

/// Replays queued outcomes in order and records every request it sees
#[derive(Default)]
pub(crate) struct MockTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<RawRequest>>,
}

impl MockTransport {
    pub(crate) fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RawRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of requests whose URL contains `needle`
    pub(crate) fn calls_to(&self, needle: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.contains(needle))
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.url))
    }
}

/// 200 response with an optional link header
pub(crate) fn ok(body: JsonValue, link: Option<&str>) -> Outcome {
    let mut headers = HeaderMap::new();
    if let Some(link) = link {
        headers.insert(LINK, HeaderValue::from_str(link).unwrap());
    }
    Ok(RawResponse {
        status: 200,
        headers,
        body,
    })
}

/// Token endpoint answer
pub(crate) fn token(access_token: &str) -> Outcome {
    ok(json!({"access_token": access_token}), None)
}

/// 401 in the shape the upstream uses for an expired access token
pub(crate) fn expired_token() -> Outcome {
    Err(TransportError::http(
        401,
        json!({"errors": [{"message": "Invalid access token."}]}),
    )
    .with_status_line("401 Unauthorized"))
}

/// Link header for page `page` of `total` with `per_page` items
pub(crate) fn link_header(base: &str, page: u32, total: u32, per_page: u32) -> String {
    let mut links = vec![format!(
        "<{base}?page={page}&per_page={per_page}>; rel=\"current\""
    )];
    if page < total {
        links.push(format!(
            "<{base}?page={}&per_page={per_page}>; rel=\"next\"",
            page + 1
        ));
    }
    if page > 1 {
        links.push(format!(
            "<{base}?page={}&per_page={per_page}>; rel=\"prev\"",
            page - 1
        ));
    }
    links.push(format!(
        "<{base}?page=1&per_page={per_page}>; rel=\"first\""
    ));
    links.push(format!(
        "<{base}?page={total}&per_page={per_page}>; rel=\"last\""
    ));
    links.join(",")
}

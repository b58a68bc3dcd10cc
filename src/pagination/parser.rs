//! Link header parsing
//!
//! Format: `<https://host/...?page=2&per_page=10>; rel="next", <...>; rel="last"`

use super::types::{PaginationInfo, Relation};
use crate::error::{Error, Result};
use regex::Regex;
use reqwest::header::{HeaderMap, LINK};
use std::sync::LazyLock;

/// Link target: `<url>`
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(.+)>").unwrap());

/// Relation name: `rel="name"`
static REL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"="([a-z]+)""#).unwrap());

/// Parse pagination metadata from response headers
///
/// Returns an empty [`PaginationInfo`] when there is no link header. A
/// segment without a `<url>` or a `rel="name"` is an error rather than a
/// silently dropped page link.
pub fn parse_pagination(headers: &HeaderMap) -> Result<PaginationInfo> {
    let Some(value) = headers.get(LINK) else {
        return Ok(PaginationInfo::default());
    };

    let header = value
        .to_str()
        .map_err(|_| Error::link_header(String::from_utf8_lossy(value.as_bytes())))?;

    parse_link_header(header)
}

/// Parse the value of a link header
///
/// Every comma-separated segment must carry a target and a relation, so an
/// empty segment (a stray or trailing comma) is an error too.
pub fn parse_link_header(header: &str) -> Result<PaginationInfo> {
    let mut info = PaginationInfo::default();

    for segment in header.split(',') {
        let mut parts = segment.split(';');
        let url = parts
            .next()
            .and_then(|target| URL_REGEX.captures(target))
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| Error::link_header(segment.trim()))?;
        let rel = parts
            .find_map(|param| REL_REGEX.captures(param))
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| Error::link_header(segment.trim()))?;

        info.links.insert(rel, url);
    }

    let last = info.get(Relation::Last);
    let per_page = last.and_then(|url| query_number(url, "per_page"));
    let total_pages = last.and_then(|url| query_number(url, "page"));
    let page_number = info
        .get(Relation::Current)
        .and_then(|url| query_number(url, "page"));

    Ok(PaginationInfo {
        per_page,
        total_pages,
        page_number,
        ..info
    })
}

/// Read an integer query argument by exact key (`page` never matches `per_page`)
fn query_number(url: &str, key: &str) -> Option<u32> {
    let (_, query) = url.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

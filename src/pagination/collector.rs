//! Full-result collection
//!
//! Drives a cursor to its last page and concatenates every page's results
//! in fetch order.

use super::cursor::PageCursor;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use tracing::{debug, info};

/// Default page cap for [`collect_all`]
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Collect the results of the current page and every page after it
///
/// Fails with [`Error::PaginationOverflow`] once more than `max_pages`
/// pages would be fetched; no partial result is returned.
pub async fn collect_all(cursor: &mut PageCursor, max_pages: usize) -> Result<Vec<JsonValue>> {
    let mut results = Vec::new();
    append(&mut results, cursor.current()?.results.clone());
    cursor.consume_held_page();

    let mut pages = 1;
    while cursor.has_next() {
        if pages >= max_pages {
            return Err(Error::PaginationOverflow { max_pages });
        }
        let page = cursor.next().await?;
        append(&mut results, page.results);
        pages += 1;
        debug!("Collected page {pages} ({} items so far)", results.len());
    }

    info!("Collected {} items from {pages} pages", results.len());
    Ok(results)
}

/// Arrays are flattened, null pages contribute nothing, anything else is
/// one item
fn append(results: &mut Vec<JsonValue>, page: JsonValue) {
    match page {
        JsonValue::Array(items) => results.extend(items),
        JsonValue::Null => {}
        other => results.push(other),
    }
}

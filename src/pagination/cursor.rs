//! Page cursor
//!
//! Navigates a paginated resource through the links discovered in each
//! response. States: unfetched -> has page -> ... -> exhausted (no `next`).

use super::types::{Relation, ResponseEnvelope};
use crate::auth::Requester;
use crate::error::{Error, Result};
use crate::types::RequestOptions;
use tracing::debug;

/// Cursor over the pages of one logical list operation
///
/// The page fetched by [`PageCursor::request`] is handed out by the first
/// call to [`PageCursor::next`] without a network call; later calls follow
/// the `next` link.
#[derive(Debug)]
pub struct PageCursor {
    requester: Requester,
    options: Option<RequestOptions>,
    current: Option<ResponseEnvelope>,
    held_page_consumed: bool,
}

impl PageCursor {
    /// Create a cursor that sends requests through `requester`
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            options: None,
            current: None,
            held_page_consumed: false,
        }
    }

    /// Issue the initial request
    pub async fn request(&mut self, options: RequestOptions) -> Result<&ResponseEnvelope> {
        self.fetch(options).await?;
        self.held_page_consumed = false;
        self.current()
    }

    /// The most recently fetched page
    pub fn current(&self) -> Result<&ResponseEnvelope> {
        self.current
            .as_ref()
            .ok_or_else(|| Error::invalid_state("no page has been requested yet"))
    }

    /// Check if the current page links to a next one
    pub fn has_next(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|page| page.pagination.has_next())
    }

    /// The next page to process
    pub async fn next(&mut self) -> Result<ResponseEnvelope> {
        if !self.held_page_consumed {
            let page = self.current()?.clone();
            self.held_page_consumed = true;
            return Ok(page);
        }
        self.get_page(Relation::Next).await
    }

    /// Jump to the first page
    pub async fn first(&mut self) -> Result<ResponseEnvelope> {
        self.get_page(Relation::First).await
    }

    /// Jump to the previous page
    pub async fn prev(&mut self) -> Result<ResponseEnvelope> {
        self.get_page(Relation::Prev).await
    }

    /// Jump to the last page
    pub async fn last(&mut self) -> Result<ResponseEnvelope> {
        self.get_page(Relation::Last).await
    }

    /// Pages remaining from the current one to the last, inclusive
    ///
    /// Recomputed from the current page on every call.
    pub fn size(&self) -> Result<u32> {
        Ok(self.current()?.pagination.remaining_pages())
    }

    /// Options of the most recent request
    pub fn options(&self) -> Option<&RequestOptions> {
        self.options.as_ref()
    }

    /// The underlying requester
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Give back the requester, carrying any refreshed token
    pub fn into_requester(self) -> Requester {
        self.requester
    }

    /// Treat the held page as already handed out
    pub(crate) fn consume_held_page(&mut self) {
        self.held_page_consumed = true;
    }

    async fn get_page(&mut self, relation: Relation) -> Result<ResponseEnvelope> {
        let current = self.current()?;
        let url = current
            .pagination
            .get(relation)
            .ok_or_else(|| Error::no_such_page(relation.as_str()))?;
        let options = self
            .options
            .as_ref()
            .ok_or_else(|| Error::invalid_state("no request options stored"))?
            .with_url(url);

        debug!("Following {} link to {}", relation, options.url);
        self.fetch(options).await?;
        self.current().cloned()
    }

    /// Fetch a page; the cursor only changes when the request succeeds
    async fn fetch(&mut self, options: RequestOptions) -> Result<()> {
        let envelope = self.requester.request(&options).await?;
        self.options = Some(options);
        self.current = Some(envelope);
        Ok(())
    }
}

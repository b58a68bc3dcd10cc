//! Pagination module
//!
//! Link-header pagination: parsing, cursor navigation and full collection.
//!
//! # Overview
//!
//! Every response is wrapped in a [`ResponseEnvelope`] whose pagination
//! metadata comes from the `Link` header. A [`PageCursor`] follows those
//! links one page at a time and [`collect_all`] drives a cursor to the end.

mod collector;
mod cursor;
mod parser;
mod types;

pub use collector::{collect_all, DEFAULT_MAX_PAGES};
pub use cursor::PageCursor;
pub use parser::{parse_link_header, parse_pagination};
pub use types::{PaginationInfo, Relation, ResponseEnvelope};

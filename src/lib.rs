// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # LMS Client
//!
//! An async client for a Canvas-style LMS REST API.
//!
//! ## Features
//!
//! - **Bearer auth with refresh**: an expired access token is exchanged for
//!   a new one exactly once and the request is resent
//! - **Link-header pagination**: navigate pages with a cursor, or collect
//!   every page into one list
//! - **Field mapping**: enrollments, exams and courses come back as flat
//!   camelCase records
//! - **YAML configuration**: endpoint overrides, page cap, timeouts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lms_client::{CallOptions, ClientConfig, Credentials, LmsClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = LmsClient::from_config(ClientConfig::from_file("lms.yaml")?)?;
//!
//!     let creds = Credentials::new(
//!         "https://school.instructure.com",
//!         "client-id",
//!         "client-secret",
//!         "access-token",
//!         "refresh-token",
//!     );
//!     let options = CallOptions::new(creds).param("courseId", 42);
//!
//!     for exam in client.course_exams(&options, None).await? {
//!         println!("{exam}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        LmsClient                          │
//! │  validate -> catalog -> build_url -> collect / single     │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────┬──────────────┴─────┬───────────────────────┐
//! │  Collector  │    PageCursor      │    Field mapping      │
//! ├─────────────┴────────────────────┤                       │
//! │  Requester (bearer + refresh)    │                       │
//! ├──────────────────────────────────┤                       │
//! │  Transport (reqwest)             │                       │
//! └──────────────────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// URL templates
pub mod template;

/// HTTP transport
pub mod http;

/// Credentials and the authenticated requester
pub mod auth;

/// Link-header pagination
pub mod pagination;

/// Response field mapping
pub mod mapping;

/// Operation -> endpoint catalog
pub mod catalog;

/// Input validation
pub mod validate;

/// Client configuration
pub mod config;

/// High-level client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::{AccessTokenListener, Credentials, Requester, UnauthorizedPolicy};
pub use catalog::{Endpoint, EndpointCatalog, Operation};
pub use client::{CallOptions, LmsClient};
pub use config::ClientConfig;
pub use http::{ReqwestTransport, Transport, TransportConfig, TransportError};
pub use pagination::{collect_all, PageCursor, PaginationInfo, ResponseEnvelope};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

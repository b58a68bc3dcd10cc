//! HTTP transport module
//!
//! The transport is the only place that touches the network. Everything
//! above it (requester, cursor, collector) talks to the [`Transport`] trait.
//!
//! # Features
//!
//! - **Pluggable**: any client that satisfies [`Transport`] can be used
//! - **Canonical errors**: raw failures are translated once, at this
//!   boundary, into a typed [`TransportError`]
//! - **reqwest backed**: [`ReqwestTransport`] is the default implementation

mod transport;

pub use transport::{
    canonical_message, RawRequest, RawResponse, ReqwestTransport, Transport, TransportConfig,
    TransportConfigBuilder, TransportError,
};

#[cfg(test)]
pub(crate) mod mock;

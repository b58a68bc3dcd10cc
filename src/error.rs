//! Error types for the LMS client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::http::TransportError;
use thiserror::Error;

/// The main error type for the LMS client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport / Authentication Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    #[error("Failed to persist refreshed access token: {0}")]
    TokenPersist(#[source] anyhow::Error),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Does not have {relation} page")]
    NoSuchPage { relation: String },

    #[error("Invalid cursor state: {message}")]
    InvalidState { message: String },

    #[error("Malformed link header segment: '{segment}'")]
    LinkHeaderParse { segment: String },

    #[error("Pagination exceeded {max_pages} pages")]
    PaginationOverflow { max_pages: usize },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a token refresh error
    pub fn token_refresh(message: impl Into<String>) -> Self {
        Self::TokenRefresh {
            message: message.into(),
        }
    }

    /// Create a missing pagination relation error
    pub fn no_such_page(relation: impl Into<String>) -> Self {
        Self::NoSuchPage {
            relation: relation.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a link header parse error
    pub fn link_header(segment: impl Into<String>) -> Self {
        Self::LinkHeaderParse {
            segment: segment.into(),
        }
    }

    /// HTTP status of a transport failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(err) => err.status,
            _ => None,
        }
    }

    /// Check if this is an authorization failure reported by the server
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type alias for the LMS client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

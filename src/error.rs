//! Error types for pagegate
//!
//! This module defines the error taxonomy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for pagegate
///
/// Every variant carries a human-readable message; [`Error::kind`] exposes
/// the machine-checkable classification callers dispatch on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed datasource address or credentials, detected before any I/O
    #[error("{message}")]
    InvalidDatasourceConfig { message: String },

    /// Unknown entity or unsupported request shape for an entity
    #[error("{message}")]
    InvalidEntityConfig { message: String },

    /// Page request parameters outside the allowed bounds
    #[error("{message}")]
    InvalidPageRequestConfig { message: String },

    /// Transport failure, timeout, or non-success HTTP status
    ///
    /// The status code and the verbatim `Retry-After` header (when the
    /// upstream supplied one) are preserved so the caller can decide its
    /// own retry policy.
    #[error("{message}")]
    DatasourceFailed {
        message: String,
        status: Option<u16>,
        retry_after: Option<String>,
    },

    /// Upstream contract violation: unparseable body, missing record list,
    /// or a record with the wrong shape
    #[error("{message}")]
    Internal { message: String },
}

/// Machine-checkable error classification, serialized for the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidDatasourceConfig,
    InvalidEntityConfig,
    InvalidPageRequestConfig,
    DatasourceFailed,
    Internal,
}

impl Error {
    /// Create an invalid-datasource-config error
    pub fn invalid_datasource_config(message: impl Into<String>) -> Self {
        Self::InvalidDatasourceConfig {
            message: message.into(),
        }
    }

    /// Create an invalid-entity-config error
    pub fn invalid_entity_config(message: impl Into<String>) -> Self {
        Self::InvalidEntityConfig {
            message: message.into(),
        }
    }

    /// Create an invalid-page-request-config error
    pub fn invalid_page_request_config(message: impl Into<String>) -> Self {
        Self::InvalidPageRequestConfig {
            message: message.into(),
        }
    }

    /// Create a datasource-failed error with no HTTP status attached
    pub fn datasource_failed(message: impl Into<String>) -> Self {
        Self::DatasourceFailed {
            message: message.into(),
            status: None,
            retry_after: None,
        }
    }

    /// Create a datasource-failed error for a non-success HTTP status
    pub fn http_status(status: u16, retry_after: Option<String>) -> Self {
        Self::DatasourceFailed {
            message: format!("datasource returned HTTP {status}"),
            status: Some(status),
            retry_after,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The machine-checkable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDatasourceConfig { .. } => ErrorKind::InvalidDatasourceConfig,
            Error::InvalidEntityConfig { .. } => ErrorKind::InvalidEntityConfig,
            Error::InvalidPageRequestConfig { .. } => ErrorKind::InvalidPageRequestConfig,
            Error::DatasourceFailed { .. } => ErrorKind::DatasourceFailed,
            Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// HTTP status carried by a datasource failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::DatasourceFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Verbatim `Retry-After` header carried by a datasource failure, if any
    pub fn retry_after(&self) -> Option<&str> {
        match self {
            Error::DatasourceFailed { retry_after, .. } => retry_after.as_deref(),
            _ => None,
        }
    }

    /// Advisory check: retry policy belongs to the caller, but only
    /// datasource failures with a retryable status (or no status at all,
    /// i.e. transport-level failures) are worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::DatasourceFailed { status, .. } => match status {
                Some(status) => is_retryable_status(*status),
                None => true,
            },
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for pagegate
pub type Result<T> = std::result::Result<T, Error>;

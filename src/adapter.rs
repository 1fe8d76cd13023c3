//! Adapter orchestration
//!
//! Wires the page-fetch protocol together: validate the request, fetch one
//! raw page over the client seam, classify the HTTP outcome, and normalize
//! the body. Each call is stateless; the only value carried between calls
//! is the cursor round-tripped through the caller.

use crate::error::{Error, Result};
use crate::normalize::{normalize_page, NormalizedPage};
use crate::registry::EntityRegistry;
use crate::request::PageRequest;
use crate::validate::validate_page_request;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// HTTP status treated as success; anything else is surfaced to the caller
/// for retry classification
pub const SUCCESS_STATUS: u16 = 200;

/// The unopinionated result of one HTTP call against the datasource
///
/// Created per call by the fetcher and consumed immediately by the
/// normalizer; never persisted. For non-success statuses the body is empty
/// because it is never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,

    /// Verbatim `Retry-After` header value, if the datasource sent one
    pub retry_after: Option<String>,

    /// Raw body bytes; empty unless the status was a success
    pub body: Bytes,
}

impl RawResponse {
    /// Create a successful response carrying a body
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: SUCCESS_STATUS,
            retry_after: None,
            body: body.into(),
        }
    }

    /// Create a response for a non-success status; the body stays unread
    pub fn status_only(status: u16, retry_after: Option<String>) -> Self {
        Self {
            status,
            retry_after,
            body: Bytes::new(),
        }
    }

    /// Whether the datasource reported success
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Decode the retry-after signal into a delay, accepting both the
    /// delta-seconds and the HTTP-date forms. Past dates decode to zero.
    pub fn retry_after_delay(&self) -> Option<Duration> {
        let value = self.retry_after.as_deref()?;
        if let Ok(seconds) = value.parse::<u64>() {
            return Some(Duration::from_secs(seconds));
        }
        let date = DateTime::parse_from_rfc2822(value).ok()?;
        let delay = (date.with_timezone(&Utc) - Utc::now()).num_seconds().max(0);
        Some(Duration::from_secs(delay as u64))
    }
}

/// Client seam between orchestration and transport
///
/// Implemented over HTTP by [`crate::http::PageFetcher`]; tests substitute
/// in-memory implementations.
#[async_trait]
pub trait PageClient: Send + Sync {
    /// Fetch one raw page of records for the requested entity
    async fn fetch_page(
        &self,
        registry: &EntityRegistry,
        request: &PageRequest,
    ) -> Result<RawResponse>;
}

/// Adapter serving normalized pages from a remote datasource
pub struct Adapter<C> {
    registry: Arc<EntityRegistry>,
    client: C,
}

impl<C: PageClient> Adapter<C> {
    /// Create an adapter over a registry and a page client
    pub fn new(registry: Arc<EntityRegistry>, client: C) -> Self {
        Self { registry, client }
    }

    /// The registry this adapter serves
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Fetch and normalize one page of records
    ///
    /// Validation runs before any network access. A non-success HTTP status
    /// becomes a [`Error::DatasourceFailed`] carrying the status code and
    /// the verbatim retry-after signal; the caller owns retry policy.
    pub async fn get_page(&self, request: &PageRequest) -> Result<NormalizedPage> {
        validate_page_request(&self.registry, request)?;

        let raw = self.client.fetch_page(&self.registry, request).await?;
        if !raw.is_success() {
            return Err(Error::http_status(raw.status, raw.retry_after));
        }

        normalize_page(&self.registry, &raw.body, request.page_size)
    }
}

//! HTTP page fetcher
//!
//! Owns the single outbound round trip per call: builds the target URL from
//! the entity's endpoint, attaches exactly one authorization header, applies
//! a bounded per-call deadline, and classifies the raw outcome without
//! interpreting the body. Retries, backoff, and rate limiting belong to the
//! external caller.

use crate::adapter::{PageClient, RawResponse};
use crate::error::{Error, Result};
use crate::registry::{EntityDescriptor, EntityRegistry};
use crate::request::PageRequest;
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default timeout for the outbound HTTP client, configurable at startup
pub const DEFAULT_OUTBOUND_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard per-call deadline; a single slow upstream call can never hang a
/// request longer than this, whatever the configured client timeout is
pub const PAGE_FETCH_DEADLINE: Duration = Duration::from_secs(5);

/// HTTP client for querying a paginated JSON datasource
pub struct PageFetcher {
    client: reqwest::Client,
    deadline: Duration,
}

impl PageFetcher {
    /// Create a fetcher with the default outbound timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_OUTBOUND_TIMEOUT)
    }

    /// Create a fetcher with a custom outbound timeout
    ///
    /// The effective per-call deadline is the smaller of the configured
    /// timeout and [`PAGE_FETCH_DEADLINE`].
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            deadline: timeout.min(PAGE_FETCH_DEADLINE),
        }
    }

    /// The per-call deadline applied to every fetch
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageClient for PageFetcher {
    async fn fetch_page(
        &self,
        registry: &EntityRegistry,
        request: &PageRequest,
    ) -> Result<RawResponse> {
        let descriptor = registry.get(&request.entity).ok_or_else(|| {
            Error::invalid_entity_config(format!(
                "Provided entity external ID is invalid: {}",
                request.entity
            ))
        })?;

        let url = build_page_url(request, descriptor)?;

        let mut req = self
            .client
            .get(url.clone())
            .timeout(self.deadline)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(credential) = &request.credential {
            req = req.header(header::AUTHORIZATION, credential.header_value());
        }

        let response = req.send().await.map_err(|e| transport_error(&e, self.deadline))?;

        // status and retry-after are captured whatever the outcome
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if status != crate::adapter::SUCCESS_STATUS {
            // not this component's call whether to retry; hand the status
            // and retry-after signal back without touching the body
            warn!(%url, status, "datasource returned non-success status");
            return Ok(RawResponse::status_only(status, retry_after));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::datasource_failed(format!("failed to read datasource response body: {e}")))?;

        debug!(%url, bytes = body.len(), "fetched page from datasource");

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Build the page URL: address joined with the entity endpoint, plus the
/// pagination query parameters. `limit` is omitted for a non-positive page
/// size and `offset` for an empty cursor.
fn build_page_url(request: &PageRequest, descriptor: &EntityDescriptor) -> Result<Url> {
    let mut url = Url::parse(&request.address)
        .map_err(|e| Error::internal(format!("failed to parse the datasource URL: {e}")))?;

    url.path_segments_mut()
        .map_err(|()| Error::internal("datasource URL cannot be a base URL"))?
        .pop_if_empty()
        .push(&descriptor.endpoint);

    {
        let mut query = url.query_pairs_mut();
        if request.page_size > 0 {
            query.append_pair("limit", &request.page_size.to_string());
        }
        if !request.cursor.is_empty() {
            query.append_pair("offset", &request.cursor);
        }
        if request.include_total {
            query.append_pair("total", "true");
        }
        if let Some(q) = request.query.as_deref().filter(|q| !q.is_empty()) {
            query.append_pair("query", q);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Classify a transport-level failure; the body is never read on this path
fn transport_error(error: &reqwest::Error, deadline: Duration) -> Error {
    if error.is_timeout() {
        Error::datasource_failed(format!(
            "datasource request timed out after {}ms",
            deadline.as_millis()
        ))
    } else {
        Error::datasource_failed(format!("failed to send request to datasource: {error}"))
    }
}

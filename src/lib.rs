//! # Pagegate
//!
//! A lightweight adapter for paginated retrieval from remote JSON data
//! sources. Given a datasource address, an entity name, a page size, and a
//! continuation cursor, it fetches exactly one bounded page of records,
//! normalizes them into a canonical shape, and returns the cursor for the
//! next page. The ingestion caller owns retries, backoff, credential
//! storage, and scheduling; every call here is stateless apart from the
//! round-tripped cursor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapter::get_page(request)               │
//! └──────────────────────────────────────────────────────────┘
//!        │                  │                     │
//! ┌──────┴──────┐   ┌───────┴───────┐   ┌─────────┴─────────┐
//! │  validate   │   │  PageFetcher  │   │  normalize        │
//! ├─────────────┤   ├───────────────┤   ├───────────────────┤
//! │ entity name │   │ URL + params  │   │ envelope detection│
//! │ credential  │   │ auth header   │   │ record validation │
//! │ https       │   │ 5s deadline   │   │ pagination signal │
//! │ page size   │   │ status/retry  │   │ next cursor       │
//! └─────────────┘   └───────────────┘   └───────────────────┘
//! ```
//!
//! Validation runs before any I/O; the fetcher performs one HTTP GET and
//! classifies the raw outcome without reading non-success bodies; the
//! normalizer accepts several envelope shapes without per-upstream
//! configuration and computes a strictly-increasing, terminating cursor
//! sequence.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy
pub mod error;

/// Common types and type aliases
pub mod types;

/// Datasource credentials
pub mod auth;

/// Entity registry
pub mod registry;

/// Page request type
pub mod request;

/// Request validation
pub mod validate;

/// Cursor arithmetic
pub mod cursor;

/// Adapter orchestration and the page-client seam
pub mod adapter;

/// HTTP page fetcher
pub mod http;

/// Response normalization
pub mod normalize;

/// In-memory sample datasource
pub mod sample;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use adapter::{Adapter, PageClient, RawResponse};
pub use auth::Credential;
pub use error::{Error, ErrorKind, Result};
pub use normalize::{normalize_page, NormalizedPage};
pub use registry::{EntityDescriptor, EntityRegistry};
pub use request::PageRequest;
pub use validate::{validate_page_request, MAX_PAGE_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

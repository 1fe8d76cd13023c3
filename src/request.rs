//! Page request
//!
//! The immutable value describing one fetch. Arrives over the wire from the
//! ingestion caller; the cursor is whatever the previous call returned.

use crate::auth::Credential;
use serde::{Deserialize, Serialize};

/// A request for one page of records from a datasource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Base address of the datasource, an `https://` origin
    pub address: String,

    /// External id of the entity to fetch (must be registered)
    pub entity: String,

    /// Maximum number of records to return
    pub page_size: u32,

    /// Continuation token from the previous page; empty means first page
    #[serde(default)]
    pub cursor: String,

    /// Credential used to authenticate against the datasource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,

    /// Whether records are returned in a stable order; must be true
    #[serde(default)]
    pub ordered: bool,

    /// Free-form filter passed through as the `query` parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Ask the datasource to include a total record count
    #[serde(default)]
    pub include_total: bool,
}

impl PageRequest {
    /// Create an ordered request with the given target and page size
    pub fn new(address: impl Into<String>, entity: impl Into<String>, page_size: u32) -> Self {
        Self {
            address: address.into(),
            entity: entity.into(),
            page_size,
            cursor: String::new(),
            credential: None,
            ordered: true,
            query: None,
            include_total: false,
        }
    }

    /// Set the continuation cursor
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// Set the credential
    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set the free-form query filter
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Request a total record count from the datasource
    #[must_use]
    pub fn with_total(mut self) -> Self {
        self.include_total = true;
        self
    }
}

//! HTTP transport for the page-fetch protocol

mod client;

pub use client::{PageFetcher, DEFAULT_OUTBOUND_TIMEOUT, PAGE_FETCH_DEADLINE};

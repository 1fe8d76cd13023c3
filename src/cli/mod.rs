//! CLI module
//!
//! Command-line interface for running the adapter.
//!
//! # Commands
//!
//! - `serve` - Start the adapter HTTP API
//! - `sample-server` - Start the in-memory sample datasource
//! - `get-page` - Fetch one page (or all pages with `--follow`)

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve};

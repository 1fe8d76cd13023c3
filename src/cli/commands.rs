//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// Pagegate adapter CLI
#[derive(Parser, Debug)]
#[command(name = "pagegate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the adapter HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Timeout for outbound datasource calls (seconds)
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Start the in-memory sample datasource
    SampleServer {
        /// Port to listen on
        #[arg(short, long, default_value = "8091")]
        port: u16,
    },

    /// Fetch one page of records from a datasource
    GetPage {
        /// Datasource base address (an https:// origin)
        #[arg(long)]
        address: String,

        /// Entity external ID (e.g. User)
        #[arg(long)]
        entity: String,

        /// Records per page
        #[arg(long, default_value = "100")]
        page_size: u32,

        /// Continuation cursor from a previous page
        #[arg(long, default_value = "")]
        cursor: String,

        /// Authorization token, sent verbatim
        #[arg(long, conflicts_with_all = ["username", "password"])]
        token: Option<String>,

        /// Basic-auth username
        #[arg(long, requires = "password")]
        username: Option<String>,

        /// Basic-auth password
        #[arg(long, requires = "username")]
        password: Option<String>,

        /// Free-form query filter
        #[arg(long)]
        query: Option<String>,

        /// Ask the datasource for a total record count
        #[arg(long)]
        total: bool,

        /// Follow cursors until the terminal page
        #[arg(long)]
        follow: bool,

        /// Timeout for outbound datasource calls (seconds)
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

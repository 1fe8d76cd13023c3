//! CLI runner - executes commands

use crate::adapter::Adapter;
use crate::auth::Credential;
use crate::cli::commands::{Cli, Commands};
use crate::cli::server;
use crate::error::Result;
use crate::http::PageFetcher;
use crate::registry::EntityRegistry;
use crate::request::PageRequest;
use crate::sample;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port, timeout } => {
                let adapter = Adapter::new(
                    EntityRegistry::builtin(),
                    PageFetcher::with_timeout(Duration::from_secs(*timeout)),
                );
                server::serve(Arc::new(adapter), *port).await
            }

            Commands::SampleServer { port } => sample::serve(EntityRegistry::builtin(), *port).await,

            Commands::GetPage {
                address,
                entity,
                page_size,
                cursor,
                token,
                username,
                password,
                query,
                total,
                follow,
                timeout,
            } => {
                let mut request = PageRequest::new(address.clone(), entity.clone(), *page_size)
                    .with_cursor(cursor.clone());
                if let Some(token) = token {
                    request = request.with_credential(Credential::token(token.clone()));
                } else if let (Some(username), Some(password)) = (username, password) {
                    request =
                        request.with_credential(Credential::basic(username.clone(), password.clone()));
                }
                if let Some(query) = query {
                    request = request.with_query(query.clone());
                }
                if *total {
                    request = request.with_total();
                }

                let adapter = Adapter::new(
                    EntityRegistry::builtin(),
                    PageFetcher::with_timeout(Duration::from_secs(*timeout)),
                );

                self.fetch_pages(&adapter, request, *follow).await
            }
        }
    }

    /// Fetch one page, or walk every page when following cursors
    async fn fetch_pages(
        &self,
        adapter: &Adapter<PageFetcher>,
        mut request: PageRequest,
        follow: bool,
    ) -> Result<()> {
        let mut pages = 0usize;
        let mut records = 0usize;

        loop {
            let page = adapter.get_page(&request).await?;
            pages += 1;
            records += page.records.len();

            let next_cursor = page.next_cursor.clone();
            println!("{}", serde_json::to_string(&page).unwrap_or_default());

            match next_cursor {
                Some(cursor) if follow => request.cursor = cursor,
                _ => break,
            }
        }

        if follow {
            info!(pages, records, "pagination complete");
        }

        Ok(())
    }
}

//! Listing and search

use anyhow::Context;
use clap::{Args, ValueEnum};
use shared::graph::GraphClient;
use shared::repo::{EventRepo, ListingQuery, SortOrder};
use shared::search::EventListing;
use shared::AppConfig;

use crate::output::OutputFormat;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Only show events whose name contains this text (case-insensitive)
    #[arg(long, short)]
    pub search: Option<String>,
    /// Order by start time
    #[arg(long, value_enum, default_value_t = Order::Asc)]
    pub order: Order,
    /// Include events the organizer disabled
    #[arg(long)]
    pub include_disabled: bool,
    /// Only events that have not started yet
    #[arg(long)]
    pub upcoming: bool,
}

impl ListArgs {
    fn query(&self) -> ListingQuery {
        ListingQuery {
            order: match self.order {
                Order::Asc => SortOrder::Asc,
                Order::Desc => SortOrder::Desc,
            },
            include_disabled: self.include_disabled,
            upcoming_after: self.upcoming.then(|| chrono::Utc::now().timestamp_millis()),
        }
    }
}

pub async fn handle(args: ListArgs, cfg: &AppConfig, format: OutputFormat) -> anyhow::Result<()> {
    let graph = GraphClient::connect(cfg)?;
    let repo = EventRepo::new(&graph);
    let listing = EventListing::fetch(&repo, &args.query())
        .await
        .with_context(|| format!("loading events from {}", graph.url()))?;
    let found = listing.search(args.search.as_deref().unwrap_or_default());
    tracing::info!(total = listing.events().len(), shown = found.len(), "listing ready");
    format.print_events(&found);
    Ok(())
}

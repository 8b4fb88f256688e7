//! Local name search over a fetched listing.

use crate::domain::event::IndexedEvent;
use crate::error::IndexError;
use crate::repo::{EventRepo, ListingQuery};

/// Case-insensitive substring match on the event name, in source order.
/// Blank search text matches everything.
pub fn filter_by_name<'a>(events: &'a [IndexedEvent], text: &str) -> Vec<&'a IndexedEvent> {
    if text.trim().is_empty() {
        return events.iter().collect();
    }
    let needle = text.to_lowercase();
    events.iter().filter(|e| e.name.to_lowercase().contains(&needle)).collect()
}

/// Events fetched once from the index; searching never goes back to the network.
#[derive(Debug, Clone, Default)]
pub struct EventListing {
    events: Vec<IndexedEvent>,
}

impl EventListing {
    pub fn new(events: Vec<IndexedEvent>) -> Self {
        Self { events }
    }

    pub async fn fetch(repo: &EventRepo<'_>, query: &ListingQuery) -> Result<Self, IndexError> {
        Ok(Self::new(repo.list(query).await?))
    }

    pub fn events(&self) -> &[IndexedEvent] {
        &self.events
    }

    pub fn search(&self, text: &str) -> Vec<&IndexedEvent> {
        filter_by_name(&self.events, text)
    }
}

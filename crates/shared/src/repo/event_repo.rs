use serde::Deserialize;

use crate::domain::event::IndexedEvent;
use crate::error::IndexError;
use crate::graph::GraphClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn as_graphql(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Which events the listing asks the index for. The default is every
/// non-disabled event, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub order: SortOrder,
    pub include_disabled: bool,
    /// Only events scheduled strictly after this epoch-millis instant.
    pub upcoming_after: Option<i64>,
}

impl ListingQuery {
    pub fn graphql(&self) -> String {
        let mut filters = Vec::new();
        if !self.include_disabled {
            filters.push("isDisabled: false");
        }
        if self.upcoming_after.is_some() {
            filters.push("eventTimestamp_gt: $currentTimestamp");
        }
        let where_clause = if filters.is_empty() {
            String::new()
        } else {
            format!(", where: {{ {} }}", filters.join(", "))
        };
        let params = if self.upcoming_after.is_some() { "($currentTimestamp: BigInt)" } else { "" };
        format!(
            "query Events{params} {{ events(orderBy: eventTimestamp, orderDirection: {}{where_clause}) \
             {{ id name eventTimestamp imageURL isDisabled }} }}",
            self.order.as_graphql()
        )
    }

    pub fn variables(&self) -> serde_json::Value {
        match self.upcoming_after {
            Some(ts) => serde_json::json!({ "currentTimestamp": ts.to_string() }),
            None => serde_json::json!({}),
        }
    }
}

#[derive(Deserialize)]
struct EventsData {
    events: Vec<IndexedEvent>,
}

pub struct EventRepo<'a> { pub graph: &'a GraphClient }

impl<'a> EventRepo<'a> {
    pub fn new(graph: &'a GraphClient) -> Self { Self { graph } }

    pub async fn list(&self, query: &ListingQuery) -> Result<Vec<IndexedEvent>, IndexError> {
        let data: EventsData = self.graph.query(&query.graphql(), query.variables()).await?;
        tracing::debug!(count = data.events.len(), "events fetched from index");
        Ok(data.events)
    }
}

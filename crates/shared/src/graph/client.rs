use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::IndexError;
use crate::AppConfig;

/// HTTP client for the event subgraph. Cheap to clone.
#[derive(Clone, Debug)]
pub struct GraphClient {
    http: reqwest::Client,
    url: Url,
}

#[derive(Serialize)]
struct GraphRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphErrorEntry>,
}

#[derive(Deserialize)]
struct GraphErrorEntry {
    message: String,
}

impl GraphClient {
    pub fn connect(cfg: &AppConfig) -> Result<Self, IndexError> {
        let url = cfg
            .subgraph_url
            .parse::<Url>()
            .map_err(|e: url::ParseError| IndexError::InvalidUrl(format!("{}: {e}", cfg.subgraph_url)))?;
        Ok(Self::new(url))
    }

    pub fn new(url: Url) -> Self {
        Self { http: reqwest::Client::new(), url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, IndexError> {
        let resp = self
            .http
            .post(self.url.clone())
            .json(&GraphRequest { query, variables })
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IndexError::Status { status: status.as_u16(), body });
        }
        let parsed: GraphResponse<T> = resp.json().await?;
        if !parsed.errors.is_empty() {
            let msg = parsed.errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
            return Err(IndexError::Graphql(msg));
        }
        parsed.data.ok_or(IndexError::EmptyResponse)
    }
}

//! Content-addressed upload of a bundle of files.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::error::StorageError;
use crate::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl NamedBlob {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }
}

/// Uploads a set of files as one unit and returns the content identifier of the set.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn put(&self, files: Vec<NamedBlob>) -> Result<String, StorageError>;
}

#[derive(Clone)]
pub struct Web3StorageClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    cid: Option<String>,
}

impl Web3StorageClient {
    pub fn connect(cfg: &AppConfig) -> Result<Self, StorageError> {
        let token = cfg
            .storage_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(StorageError::MissingToken)?;
        let base = cfg
            .storage_url
            .parse::<Url>()
            .map_err(|e: url::ParseError| StorageError::InvalidUrl(format!("{}: {e}", cfg.storage_url)))?;
        Ok(Self::new(base, token))
    }

    pub fn new(base: Url, token: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base, token: token.into() }
    }

    /// `{base}/upload`, keeping any path prefix of the base.
    fn upload_url(&self) -> Result<Url, StorageError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push("upload");
        Ok(url)
    }
}

impl std::fmt::Debug for Web3StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Web3StorageClient").field("base", &self.base.as_str()).finish_non_exhaustive()
    }
}

#[async_trait]
impl ContentStore for Web3StorageClient {
    async fn put(&self, files: Vec<NamedBlob>) -> Result<String, StorageError> {
        let count = files.len();
        let form = files.into_iter().fold(Form::new(), |form, blob| {
            form.part("file", Part::bytes(blob.bytes).file_name(blob.name))
        });
        let resp = self
            .http
            .post(self.upload_url()?)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "upload rejected");
            return Err(StorageError::Status { status: status.as_u16(), body });
        }
        let cid = resp
            .json::<UploadResponse>()
            .await?
            .cid
            .filter(|c| !c.is_empty())
            .ok_or(StorageError::MissingCid)?;
        tracing::info!(%cid, files = count, "bundle uploaded");
        Ok(cid)
    }
}

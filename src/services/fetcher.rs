//! Page fetching.
//!
//! The crawl pipeline only sees the [`PageFetcher`] trait; [`HttpFetcher`]
//! is the production implementation.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::Result;
use crate::models::CrawlerConfig;
use crate::services::Document;
use crate::utils::http::create_async_client;

/// Raw response body together with its final URL.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub url: Url,
    pub body: String,
}

impl Fetched {
    /// Parse the body into a [`Document`].
    pub fn into_document(self) -> Document {
        Document::parse(self.url, &self.body)
    }
}

/// Source of HTML pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Fetched>;
}

/// Fetches pages over HTTP.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Fetched> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        let url = response.url().clone();
        let body = response.text().await?;
        Ok(Fetched { url, body })
    }
}

//! HTTP feed backend.
//!
//! Fetches `<base_url>/<category>.json` from a static host. One shared
//! client with conservative timeouts; a slow host must never hold a
//! listing request hostage.

use std::time::Duration;

use super::{ArticleSource, FeedError, FeedTimeouts, parse_feed_document};
use crate::article::{Article, Category};

pub struct HttpFeedSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFeedSource {
    /// # Errors
    ///
    /// Returns [`FeedError::HttpClientBuild`] if the client cannot be built.
    pub fn new(base_url: impl Into<String>, timeouts: FeedTimeouts) -> Result<Self, FeedError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| FeedError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }
}

#[async_trait::async_trait]
impl ArticleSource for HttpFeedSource {
    async fn fetch(&self, category: &Category) -> Result<Vec<Article>, FeedError> {
        let url = format!("{}/{category}.json", self.base_url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(FeedError::NotFound(category.to_string()));
        }
        let text = response
            .text()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;
        if status != 200 {
            return Err(FeedError::Status { status });
        }
        parse_feed_document(&text)
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

//! Article feed: per-category document retrieval.
//!
//! DESIGN
//! ======
//! Each category is one static JSON document (`<category>.json`) of shape
//! `{"articles": [...]}`. `ArticleSource` is the seam: the directory backend
//! reads documents from local disk, the HTTP backend fetches them from a
//! static host. `fetch_category` applies the presentation policy on top of
//! either backend: any failure collapses to an empty list, logged but never
//! surfaced, so an unreachable feed reads the same as an empty category.

pub mod dir;
pub mod http;

pub use dir::DirFeedSource;
pub use http::HttpFeedSource;

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::article::{Article, Category};

pub const DEFAULT_NEWS_DATA_DIR: &str = "./news-data";
pub const DEFAULT_FEED_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FEED_CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by feed backends.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// No document exists for the category.
    #[error("no feed document for category: {0}")]
    NotFound(String),

    /// The request to the feed host failed.
    #[error("feed request failed: {0}")]
    Request(String),

    /// The feed host returned a non-success HTTP status.
    #[error("feed response error: status {status}")]
    Status { status: u16 },

    /// The document is not a JSON object with an `articles` array.
    #[error("feed document malformed: {0}")]
    Shape(String),

    /// Reading a local feed document failed.
    #[error("feed io error: {0}")]
    Io(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// SOURCE TRAIT
// =============================================================================

/// Async seam over category feed documents. Enables stubbing in tests.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    /// Retrieve the articles of one category document.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] if the document is missing, unreachable, or
    /// not shaped like `{"articles": [...]}`.
    async fn fetch(&self, category: &Category) -> Result<Vec<Article>, FeedError>;
}

// =============================================================================
// GATEWAY POLICY
// =============================================================================

/// Fetch one category, collapsing every failure to an empty list.
///
/// Presentation never distinguishes a failed fetch from an empty category:
/// the failure is logged here and the caller renders the empty state.
pub async fn fetch_category(source: &dyn ArticleSource, category: &Category) -> Vec<Article> {
    match source.fetch(category).await {
        Ok(articles) => articles,
        Err(e) => {
            warn!(category = %category, error = %e, "category fetch failed, serving empty list");
            Vec::new()
        }
    }
}

// =============================================================================
// DOCUMENT PARSING
// =============================================================================

/// Parse a feed document, keeping every record with a usable URL.
///
/// Records that are not objects or carry no non-blank `url` are skipped,
/// never fatal; a document without an `articles` array is a shape error.
pub(crate) fn parse_feed_document(text: &str) -> Result<Vec<Article>, FeedError> {
    let doc: Value = serde_json::from_str(text).map_err(|e| FeedError::Shape(e.to_string()))?;
    let records = doc
        .get("articles")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::Shape("missing articles array".into()))?;

    let mut articles = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Article>(record.clone()) {
            Ok(article) if !article.url.trim().is_empty() => articles.push(article),
            Ok(_) => debug!("skipping record with blank url"),
            Err(e) => debug!(error = %e, "skipping malformed record"),
        }
    }
    Ok(articles)
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Feed configuration parsed from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Static host base URL. Selects the HTTP backend when set.
    pub base_url: Option<String>,
    /// Local documents directory for the default backend.
    pub data_dir: PathBuf,
    pub timeouts: FeedTimeouts,
}

impl FeedConfig {
    /// Build typed feed config from environment variables.
    ///
    /// - `NEWS_FEED_URL`: static host base URL (optional)
    /// - `NEWS_DATA_DIR`: local documents directory (default `./news-data`)
    /// - `FEED_REQUEST_TIMEOUT_SECS`: default 10
    /// - `FEED_CONNECT_TIMEOUT_SECS`: default 5
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("NEWS_FEED_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string()),
            data_dir: std::env::var("NEWS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_NEWS_DATA_DIR)),
            timeouts: FeedTimeouts {
                request_secs: env_parse_u64("FEED_REQUEST_TIMEOUT_SECS", DEFAULT_FEED_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("FEED_CONNECT_TIMEOUT_SECS", DEFAULT_FEED_CONNECT_TIMEOUT_SECS),
            },
        }
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

/// Build the article source from environment variables. A configured
/// `NEWS_FEED_URL` selects the HTTP backend; otherwise documents are read
/// from the local data directory.
///
/// # Errors
///
/// Returns [`FeedError::HttpClientBuild`] if the HTTP client cannot be built.
pub fn source_from_env() -> Result<Arc<dyn ArticleSource>, FeedError> {
    source_from_config(&FeedConfig::from_env())
}

/// Build the article source from a parsed typed config.
///
/// # Errors
///
/// Returns [`FeedError::HttpClientBuild`] if the HTTP client cannot be built.
pub fn source_from_config(config: &FeedConfig) -> Result<Arc<dyn ArticleSource>, FeedError> {
    match &config.base_url {
        Some(base) => {
            info!(base_url = %base, "article feed: http");
            Ok(Arc::new(HttpFeedSource::new(base.clone(), config.timeouts)?))
        }
        None => {
            info!(dir = %config.data_dir.display(), "article feed: local directory");
            Ok(Arc::new(DirFeedSource::new(config.data_dir.clone())))
        }
    }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;

//! Local-directory feed backend.
//!
//! Reads `<dir>/<category>.json` documents straight from disk. This is the
//! default backend: a fresh checkout serves the bundled sample documents
//! with no network at all.

use std::path::PathBuf;

use super::{ArticleSource, FeedError, parse_feed_document};
use crate::article::{Article, Category};

pub struct DirFeedSource {
    dir: PathBuf,
}

impl DirFeedSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait::async_trait]
impl ArticleSource for DirFeedSource {
    async fn fetch(&self, category: &Category) -> Result<Vec<Article>, FeedError> {
        let path = self.dir.join(format!("{category}.json"));
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FeedError::NotFound(category.to_string()));
            }
            Err(e) => return Err(FeedError::Io(e.to_string())),
        };
        parse_feed_document(&text)
    }
}

#[cfg(test)]
#[path = "dir_test.rs"]
mod tests;

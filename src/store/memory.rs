//! In-memory saved store.
//!
//! Backs tests and ephemeral runs (`SAVED_STORE=memory`). Same list
//! semantics as the file backend, with no slot file and nothing surviving
//! a restart.

use tokio::sync::RwLock;

use super::{SavedStore, StoreError, drop_url, prepend_if_absent};
use crate::article::Article;

pub struct MemoryStore {
    list: RwLock<Vec<Article>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self { list: RwLock::new(Vec::new()) }
    }

    /// Store pre-populated with records, newest first. Test convenience.
    #[cfg(test)]
    pub(crate) fn with_articles(articles: Vec<Article>) -> Self {
        Self { list: RwLock::new(articles) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SavedStore for MemoryStore {
    async fn all(&self) -> Result<Vec<Article>, StoreError> {
        Ok(self.list.read().await.clone())
    }

    async fn save(&self, article: Article) -> Result<bool, StoreError> {
        let mut list = self.list.write().await;
        Ok(prepend_if_absent(&mut list, article))
    }

    async fn remove(&self, url: &str) -> Result<bool, StoreError> {
        let mut list = self.list.write().await;
        Ok(drop_url(&mut list, url))
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

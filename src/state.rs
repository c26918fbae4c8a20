//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the two backend seams: the article source listings read from and
//! the saved store that owns the persisted reading list. Both are trait
//! objects so tests swap in stubs and in-memory backends.

use std::sync::Arc;

use crate::feed::ArticleSource;
use crate::store::SavedStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; both fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    pub store: Arc<dyn SavedStore>,
}

impl AppState {
    #[must_use]
    pub fn new(source: Arc<dyn ArticleSource>, store: Arc<dyn SavedStore>) -> Self {
        Self { source, store }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;

    use super::*;
    use crate::article::{Article, Category};
    use crate::feed::FeedError;
    use crate::store::MemoryStore;

    /// Fixed-response article source: category name -> articles.
    pub struct StubFeed {
        pub documents: HashMap<String, Vec<Article>>,
    }

    #[async_trait::async_trait]
    impl ArticleSource for StubFeed {
        async fn fetch(&self, category: &Category) -> Result<Vec<Article>, FeedError> {
            self.documents
                .get(category.as_str())
                .cloned()
                .ok_or_else(|| FeedError::NotFound(category.to_string()))
        }
    }

    /// Source that fails every fetch.
    pub struct FailingFeed;

    #[async_trait::async_trait]
    impl ArticleSource for FailingFeed {
        async fn fetch(&self, category: &Category) -> Result<Vec<Article>, FeedError> {
            Err(FeedError::Request(format!("stub failure for {category}")))
        }
    }

    /// Create a test `AppState`: in-memory store, no feed documents.
    #[must_use]
    pub fn test_app_state() -> AppState {
        test_app_state_with_documents(HashMap::new())
    }

    /// Create a test `AppState` with fixed feed documents.
    #[must_use]
    pub fn test_app_state_with_documents(documents: HashMap<String, Vec<Article>>) -> AppState {
        AppState::new(Arc::new(StubFeed { documents }), Arc::new(MemoryStore::new()))
    }

    /// Create a dummy `Article`, unique by the given tag.
    #[must_use]
    pub fn dummy_article(tag: &str) -> Article {
        Article {
            url: format!("https://news.example.com/{tag}"),
            title: Some(format!("Story {tag}")),
            description: Some("A test story.".into()),
            image_url: Some(format!("https://img.example.com/{tag}.jpg")),
            published_at: Some("2025-01-15T10:30:00Z".into()),
            author: Some("Test Desk".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn cloned_state_shares_the_store() {
        let state = test_helpers::test_app_state();
        let clone = state.clone();
        let article = test_helpers::dummy_article("a");

        clone.store.save(article.clone()).await.unwrap();
        assert!(state.store.is_saved(&article.url).await.unwrap());
    }

    #[tokio::test]
    async fn stub_feed_serves_only_its_documents() {
        let mut documents = HashMap::new();
        documents.insert("general".to_string(), vec![test_helpers::dummy_article("g")]);
        let state = test_helpers::test_app_state_with_documents(documents);

        let general = crate::article::Category::parse("general").unwrap();
        let sports = crate::article::Category::parse("sports").unwrap();
        assert_eq!(state.source.fetch(&general).await.unwrap().len(), 1);
        assert!(state.source.fetch(&sports).await.is_err());
    }
}

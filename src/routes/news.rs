//! News listing routes.
//!
//! DESIGN
//! ======
//! Listings are read-only projections: articles from the feed gateway plus
//! per-card presentation fields (derived source label, saved flag). A
//! category that cannot be fetched, or is not even a plausible name, lists
//! as empty with a 200; the views have exactly one empty state.

use std::collections::HashSet;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::debug;

use super::saved::store_error_to_status;
use crate::article::{Article, Category, DEFAULT_CATEGORIES};
use crate::feed;
use crate::state::AppState;
use crate::store::{SavedStore, StoreError};

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// One article as presented to the views: stored fields plus the derived
/// source label and the per-card saved flag.
#[derive(Debug, Serialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub saved: bool,
}

impl ArticleView {
    pub(crate) fn from_article(article: Article, saved: bool) -> Self {
        Self { source: article.source(), saved, article }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: [&'static str; 7],
}

#[derive(Debug, Serialize)]
pub struct CategoryNewsResponse {
    pub category: String,
    pub articles: Vec<ArticleView>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Category index for the picker.
pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse { categories: DEFAULT_CATEGORIES })
}

/// Headlines for one category. Unknown or failing categories list as empty,
/// never as an error.
pub async fn category_headlines(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryNewsResponse>, StatusCode> {
    let Ok(parsed) = Category::parse(&category) else {
        debug!(%category, "rejected category name");
        return Ok(Json(CategoryNewsResponse { category, articles: Vec::new() }));
    };

    let articles = feed::fetch_category(state.source.as_ref(), &parsed).await;
    let views = with_saved_flags(state.store.as_ref(), articles)
        .await
        .map_err(store_error_to_status)?;
    Ok(Json(CategoryNewsResponse { category, articles: views }))
}

/// Project articles into views, marking the ones whose URL is saved. One
/// store read covers the whole listing instead of a lookup per card.
async fn with_saved_flags(
    store: &dyn SavedStore,
    articles: Vec<Article>,
) -> Result<Vec<ArticleView>, StoreError> {
    let saved: HashSet<String> = store.all().await?.into_iter().map(|a| a.url).collect();
    Ok(articles
        .into_iter()
        .map(|article| {
            let is_saved = saved.contains(&article.url);
            ArticleView::from_article(article, is_saved)
        })
        .collect())
}

#[cfg(test)]
#[path = "news_test.rs"]
mod tests;

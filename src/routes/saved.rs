//! Saved-list routes: the persisted reading list.
//!
//! DESIGN
//! ======
//! Save and remove are idempotent whole-list mutations; responses carry a
//! changed flag and the new count so the views can refresh their badges
//! without a second round-trip. Store failures (unreadable or corrupt slot)
//! map to 500; the slot is never silently repaired.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::news::ArticleView;
use crate::article::Article;
use crate::state::AppState;
use crate::store::StoreError;

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SavedListResponse {
    pub articles: Vec<ArticleView>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    /// `true` iff the article was newly added.
    pub saved: bool,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    /// `true` iff a record was actually removed.
    pub removed: bool,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct RemoveBody {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub saved: bool,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// The whole saved list, newest save first.
pub async fn list_saved(State(state): State<AppState>) -> Result<Json<SavedListResponse>, StatusCode> {
    let articles = state.store.all().await.map_err(store_error_to_status)?;
    let count = articles.len();
    let views = articles
        .into_iter()
        .map(|article| ArticleView::from_article(article, true))
        .collect();
    Ok(Json(SavedListResponse { articles: views, count }))
}

/// Save one article. Saving an already-saved URL changes nothing and
/// answers 200 instead of 201.
pub async fn save_article(
    State(state): State<AppState>,
    Json(article): Json<Article>,
) -> Result<(StatusCode, Json<SaveResponse>), StatusCode> {
    if article.url.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let saved = state.store.save(article).await.map_err(store_error_to_status)?;
    let count = state.store.count().await.map_err(store_error_to_status)?;
    let status = if saved { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(SaveResponse { saved, count })))
}

/// Remove by URL. Removing an absent URL changes nothing.
pub async fn remove_article(
    State(state): State<AppState>,
    Json(body): Json<RemoveBody>,
) -> Result<Json<RemoveResponse>, StatusCode> {
    let removed = state.store.remove(&body.url).await.map_err(store_error_to_status)?;
    let count = state.store.count().await.map_err(store_error_to_status)?;
    Ok(Json(RemoveResponse { removed, count }))
}

/// Whether a URL is currently saved.
pub async fn saved_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let saved = state.store.is_saved(&query.url).await.map_err(store_error_to_status)?;
    Ok(Json(StatusResponse { saved }))
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    error!(error = %err, "saved store operation failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
#[path = "saved_test.rs"]
mod tests;

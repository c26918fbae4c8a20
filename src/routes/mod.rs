//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API and the static site under a single Axum router. The
//! two-view frontend (home and saved list) is served as static files at `/`;
//! everything it calls lives under `/api`.

pub mod news;
pub mod saved;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes shared by the static frontend and external callers.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/news", get(news::list_categories))
        .route("/api/news/{category}", get(news::category_headlines))
        .route(
            "/api/saved",
            get(saved::list_saved)
                .post(saved::save_article)
                .delete(saved::remove_article),
        )
        .route("/api/saved/status", get(saved::saved_status))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the path to the static website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"))
}

/// Full application: API routes with the static site as the fallback.
pub fn app(state: AppState) -> Router {
    let website_service = ServeDir::new(website_dir()).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(website_service)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

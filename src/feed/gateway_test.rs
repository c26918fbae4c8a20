use super::*;
use crate::state::test_helpers::{FailingFeed, StubFeed, dummy_article};
use std::collections::HashMap;

fn category(name: &str) -> Category {
    Category::parse(name).expect("test category should be valid")
}

// ===== gateway policy =====

#[tokio::test]
async fn fetch_category_passes_articles_through() {
    let mut documents = HashMap::new();
    documents.insert("technology".to_string(), vec![dummy_article("t1"), dummy_article("t2")]);
    let source = StubFeed { documents };

    let articles = fetch_category(&source, &category("technology")).await;
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].url, "https://news.example.com/t1");
}

#[tokio::test]
async fn fetch_category_collapses_missing_documents_to_empty() {
    let source = StubFeed { documents: HashMap::new() };
    let articles = fetch_category(&source, &category("business")).await;
    assert!(articles.is_empty());
}

#[tokio::test]
async fn fetch_category_collapses_request_failures_to_empty() {
    let articles = fetch_category(&FailingFeed, &category("science")).await;
    assert!(articles.is_empty());
}

// ===== document parsing =====

#[test]
fn parse_keeps_well_formed_records() {
    let doc = serde_json::json!({
        "articles": [
            {
                "url": "https://www.example.com/one",
                "title": "One",
                "urlToImage": "https://www.example.com/one.jpg",
                "publishedAt": "2025-02-01T09:00:00Z"
            },
            { "url": "https://www.example.com/two" }
        ]
    });
    let articles = parse_feed_document(&doc.to_string()).unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title.as_deref(), Some("One"));
    assert_eq!(articles[0].image_url.as_deref(), Some("https://www.example.com/one.jpg"));
    assert!(articles[1].title.is_none());
}

#[test]
fn parse_skips_records_without_a_usable_url() {
    let doc = serde_json::json!({
        "articles": [
            { "title": "no url at all" },
            { "url": "   " },
            "not even an object",
            { "url": "https://www.example.com/kept" }
        ]
    });
    let articles = parse_feed_document(&doc.to_string()).unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].url, "https://www.example.com/kept");
}

#[test]
fn parse_rejects_documents_without_an_articles_array() {
    assert!(matches!(parse_feed_document("{}"), Err(FeedError::Shape(_))));
    assert!(matches!(parse_feed_document(r#"{"articles": 7}"#), Err(FeedError::Shape(_))));
    assert!(matches!(parse_feed_document("[]"), Err(FeedError::Shape(_))));
    assert!(matches!(parse_feed_document("not json"), Err(FeedError::Shape(_))));
}

#[test]
fn parse_accepts_an_empty_articles_array() {
    let articles = parse_feed_document(r#"{"articles": []}"#).unwrap();
    assert!(articles.is_empty());
}

#[test]
fn parse_ignores_extra_document_fields() {
    let doc = r#"{"status":"ok","totalResults":1,"articles":[{"url":"https://www.example.com/x"}]}"#;
    let articles = parse_feed_document(doc).unwrap();
    assert_eq!(articles.len(), 1);
}

// ===== config =====

/// Serializes the env-mutating tests; no other test reads these vars.
static ENV_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_GUARD.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`ENV_GUARD`]; the process env is global state.
unsafe fn clear_feed_env() {
    unsafe {
        std::env::remove_var("NEWS_FEED_URL");
        std::env::remove_var("NEWS_DATA_DIR");
        std::env::remove_var("FEED_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("FEED_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_to_the_local_directory() {
    let _env = lock_env();
    unsafe { clear_feed_env() };

    let config = FeedConfig::from_env();
    assert_eq!(config.base_url, None);
    assert_eq!(config.data_dir, std::path::PathBuf::from(DEFAULT_NEWS_DATA_DIR));
    assert_eq!(
        config.timeouts,
        FeedTimeouts {
            request_secs: DEFAULT_FEED_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_FEED_CONNECT_TIMEOUT_SECS
        }
    );
}

#[test]
fn from_env_parses_http_overrides() {
    let _env = lock_env();
    unsafe {
        clear_feed_env();
        std::env::set_var("NEWS_FEED_URL", "https://feeds.example.net/v1/");
        std::env::set_var("FEED_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("FEED_CONNECT_TIMEOUT_SECS", "7");
    }

    let config = FeedConfig::from_env();
    assert_eq!(config.base_url.as_deref(), Some("https://feeds.example.net/v1"), "trailing slash trimmed");
    assert_eq!(config.timeouts, FeedTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_feed_env() };
}

#[test]
fn unparseable_timeout_falls_back_to_default() {
    let _env = lock_env();
    unsafe {
        clear_feed_env();
        std::env::set_var("FEED_REQUEST_TIMEOUT_SECS", "soon");
    }

    let config = FeedConfig::from_env();
    assert_eq!(config.timeouts.request_secs, DEFAULT_FEED_REQUEST_TIMEOUT_SECS);

    unsafe { clear_feed_env() };
}

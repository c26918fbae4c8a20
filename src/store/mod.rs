//! Saved-articles store: the persisted reading list.
//!
//! DESIGN
//! ======
//! The saved list is one named slot holding a JSON array of article records,
//! newest save first, unique by URL. Every mutation is a whole-list
//! read-modify-write; there is no partial update. `SavedStore` is the seam:
//! handlers depend on the trait, backends decide where the slot lives (a
//! file under the data directory, or nowhere for ephemeral runs and tests).
//!
//! ERROR HANDLING
//! ==============
//! A slot that exists but cannot be parsed is reported as [`StoreError::Corrupt`]
//! from every operation. The store never repairs or overwrites data it cannot
//! read; recovery is a human deleting or fixing the slot file.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::article::Article;

/// File name of the slot that holds the serialized saved list.
pub const SLOT_FILE_NAME: &str = "saved_articles.json";

pub const DEFAULT_DATA_DIR: &str = "./data";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by saved-store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// Reading or writing the slot failed.
    #[error("slot io error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot exists but does not hold a JSON array of article records.
    #[error("slot corrupt: {0}")]
    Corrupt(String),
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Async seam over the saved-articles slot. Enables swapping the file
/// backend for an in-memory one in tests and ephemeral runs.
#[async_trait::async_trait]
pub trait SavedStore: Send + Sync {
    /// The whole saved list, newest save first. An absent slot reads as the
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the slot cannot be read and
    /// [`StoreError::Corrupt`] if its contents are not an article array.
    async fn all(&self) -> Result<Vec<Article>, StoreError>;

    /// Prepend the article unless its URL is already saved. Returns `true`
    /// iff the list changed; saving an existing URL reorders nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot cannot be read or written.
    async fn save(&self, article: Article) -> Result<bool, StoreError>;

    /// Drop every record matching this URL. Returns `true` iff the list
    /// changed; removing an absent URL is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot cannot be read or written.
    async fn remove(&self, url: &str) -> Result<bool, StoreError>;

    /// Whether a record with this URL is currently saved.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot cannot be read.
    async fn is_saved(&self, url: &str) -> Result<bool, StoreError> {
        Ok(self.all().await?.iter().any(|a| a.url == url))
    }

    /// Number of saved records.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot cannot be read.
    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.all().await?.len())
    }
}

// =============================================================================
// LIST OPERATIONS
// =============================================================================

/// Prepend `article` unless a record with its URL is already present.
/// Returns `true` iff the list changed.
pub(crate) fn prepend_if_absent(list: &mut Vec<Article>, article: Article) -> bool {
    if list.iter().any(|a| a.url == article.url) {
        return false;
    }
    list.insert(0, article);
    true
}

/// Drop every record whose URL matches. Returns `true` iff the list changed.
pub(crate) fn drop_url(list: &mut Vec<Article>, url: &str) -> bool {
    let before = list.len();
    list.retain(|a| a.url != url);
    list.len() != before
}

// =============================================================================
// BACKEND DISPATCH
// =============================================================================

/// Build the saved store from environment variables.
///
/// - `SAVED_STORE`: `file` (default) or `memory`
/// - `DATA_DIR`: slot directory for the file backend (default `./data`)
///
/// # Errors
///
/// Returns [`StoreError::ConfigParse`] for an unknown backend name and
/// [`StoreError::Io`] if the data directory cannot be created.
pub fn store_from_env() -> Result<Arc<dyn SavedStore>, StoreError> {
    match std::env::var("SAVED_STORE").ok().as_deref() {
        None | Some("file") => {
            let dir = std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
            let store = JsonFileStore::open(&dir)?;
            info!(dir = %dir.display(), "saved store: file slot");
            Ok(Arc::new(store))
        }
        Some("memory") => {
            info!("saved store: in-memory (ephemeral)");
            Ok(Arc::new(MemoryStore::new()))
        }
        Some(other) => Err(StoreError::ConfigParse(format!("unknown SAVED_STORE: {other}"))),
    }
}

//! Article model: the news record and category name shared by every module.
//!
//! DESIGN
//! ======
//! An article's identity is its URL; every other field is optional display
//! data. Field names on the wire stay camelCase (`urlToImage`, `publishedAt`)
//! so feed documents and the slot file read the same in any JSON viewer.
//! Category names parameterize filesystem and URL paths, so they are
//! validated before any backend sees them.

use serde::{Deserialize, Serialize};

/// The category picker's fixed set.
pub const DEFAULT_CATEGORIES: [&str; 7] =
    ["general", "business", "entertainment", "health", "science", "sports", "technology"];

/// Longest accepted category name, in bytes.
pub const MAX_CATEGORY_LEN: usize = 64;

// =============================================================================
// ARTICLE
// =============================================================================

/// One news record. Unique by `url`; all display fields are optional and a
/// missing or malformed value never invalidates the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Canonical link to the story and the identity of a saved record.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "urlToImage", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Publication timestamp kept as the raw feed string. Display-only.
    #[serde(default, rename = "publishedAt", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Article {
    /// Short source label derived from this article's URL.
    #[must_use]
    pub fn source(&self) -> Option<String> {
        source_label(&self.url)
    }
}

/// Derive the short source label from an article URL: the canonical
/// lowercased host with any leading `www.` removed, truncated at the first
/// dot (`https://www.bbc.co.uk/news` -> `bbc`). `None` when the URL has no
/// absolute form to take a host from.
#[must_use]
pub fn source_label(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let label = host.split('.').next()?;
    if label.is_empty() { None } else { Some(label.to_string()) }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// A validated category name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

/// Rejected category name.
#[derive(Debug, thiserror::Error)]
#[error("invalid category name: {0:?}")]
pub struct InvalidCategory(pub String);

impl Category {
    /// Validate a raw category name: non-empty, at most
    /// [`MAX_CATEGORY_LEN`] bytes, lowercase ASCII letters only.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCategory`] for anything that could escape the
    /// per-category document path.
    pub fn parse(raw: &str) -> Result<Self, InvalidCategory> {
        if raw.is_empty() || raw.len() > MAX_CATEGORY_LEN {
            return Err(InvalidCategory(raw.to_string()));
        }
        if !raw.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(InvalidCategory(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

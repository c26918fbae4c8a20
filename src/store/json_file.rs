//! File-backed saved store.
//!
//! DESIGN
//! ======
//! One slot file (`saved_articles.json`) holds the whole list as a JSON
//! array. Reads parse the full array; mutations write the new array to a
//! sibling temp file and rename it over the slot, so a torn write can only
//! ever hit the temp file. An async mutex spans every operation so
//! concurrent handlers cannot interleave between read and write. Writers in
//! other processes are not guarded; the last write wins.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::{SLOT_FILE_NAME, SavedStore, StoreError, drop_url, prepend_if_absent};
use crate::article::Article;

pub struct JsonFileStore {
    slot: PathBuf,
    /// Spans whole operations, not individual file calls.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed. The
    /// slot file itself is created lazily by the first save.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(Self { slot: dir.join(SLOT_FILE_NAME), lock: Mutex::new(()) })
    }

    /// Path of the slot file. Test hook.
    #[cfg(test)]
    pub(crate) fn slot_path(&self) -> &Path {
        &self.slot
    }

    async fn read_slot(&self) -> Result<Vec<Article>, StoreError> {
        let bytes = match tokio::fs::read(&self.slot).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn write_slot(&self, list: &[Article]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(list).map_err(std::io::Error::other)?;
        // Sibling temp file, then rename: the slot only ever holds a complete document.
        let tmp = self.slot.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.slot).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SavedStore for JsonFileStore {
    async fn all(&self) -> Result<Vec<Article>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_slot().await
    }

    async fn save(&self, article: Article) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut list = self.read_slot().await?;
        if !prepend_if_absent(&mut list, article) {
            return Ok(false);
        }
        self.write_slot(&list).await?;
        Ok(true)
    }

    async fn remove(&self, url: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut list = self.read_slot().await?;
        if !drop_url(&mut list, url) {
            return Ok(false);
        }
        self.write_slot(&list).await?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "json_file_test.rs"]
mod tests;

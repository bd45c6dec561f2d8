//! Local filesystem storage implementation.
//!
//! Writes go to a temporary sibling file that is renamed over the target,
//! so a crash mid-write leaves the previous state intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::CrawlState;
use crate::storage::StateStorage;

/// JSON state file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.write_bytes(&bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data; undecodable content is a corrupt-state error.
    async fn read_json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match self.read_bytes().await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| AppError::state(self.path.display().to_string(), e)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl StateStorage for LocalStorage {
    async fn load_state(&self) -> Result<CrawlState> {
        match self.read_json::<CrawlState>().await? {
            Some(state) => {
                log::info!(
                    "Loaded state from {}: {} seen, {} pending pages",
                    self.path.display(),
                    state.seen.len(),
                    state.pages.len()
                );
                Ok(state)
            }
            None => {
                log::info!("No state at {}, starting fresh", self.path.display());
                Ok(CrawlState::new())
            }
        }
    }

    async fn save_state(&self, state: &CrawlState) -> Result<()> {
        self.write_json(state).await?;
        log::debug!(
            "Saved state to {}: {} seen, {} pending pages",
            self.path.display(),
            state.seen.len(),
            state.pages.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Page, Row};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_fresh_state() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("state.json"));

        let state = storage.load_state().await.unwrap();
        assert_eq!(state, CrawlState::new());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested/state.json"));

        let mut state = CrawlState::new();
        state.mark_seen(3);
        state.mark_seen(5);
        state.insert_page(
            5,
            Page::new("ГПВ", vec![Row::new("4.ІІ", "08:00-09:30, 16:30-20:00")]),
        );

        storage.save_state(&state).await.unwrap();
        let loaded = storage.load_state().await.unwrap();
        assert_eq!(loaded, state);
        assert!(!storage.path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, b"{not json").unwrap();

        let result = LocalStorage::new(&path).load_state().await;
        assert!(matches!(result, Err(AppError::State { .. })));
    }
}

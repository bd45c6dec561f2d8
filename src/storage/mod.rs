//! Crawl state persistence.
//!
//! The whole [`CrawlState`] is stored as one JSON document. A missing
//! document means a fresh start; an unreadable one is an error.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CrawlState;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for crawl state storage backends.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Load the persisted state, or an empty state if none exists.
    async fn load_state(&self) -> Result<CrawlState>;

    /// Replace the persisted state.
    async fn save_state(&self, state: &CrawlState) -> Result<()>;
}

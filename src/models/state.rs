//! Durable crawl state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::page::{AnnouncementId, Page};

/// Seen announcement ids plus the pages extracted but not yet consumed.
///
/// This is the unit of persistence between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrawlState {
    /// Every id ever observed on the homepage, matching or not
    #[serde(default)]
    pub seen: BTreeSet<AnnouncementId>,

    /// Parsed schedules keyed by announcement id
    #[serde(default)]
    pub pages: BTreeMap<AnnouncementId, Page>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as seen. Returns `true` if it was not seen before.
    ///
    /// The novelty check and the insertion are a single operation, so an id
    /// can never be reported as new twice.
    pub fn mark_seen(&mut self, id: AnnouncementId) -> bool {
        self.seen.insert(id)
    }

    /// Store a parsed page, replacing any page with the same id.
    pub fn insert_page(&mut self, id: AnnouncementId, page: Page) {
        self.pages.insert(id, page);
    }

    /// Remove and return all pages, keeping `seen` intact.
    pub fn take_pages(&mut self) -> BTreeMap<AnnouncementId, Page> {
        std::mem::take(&mut self.pages)
    }
}

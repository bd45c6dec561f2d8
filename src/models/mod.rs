// src/models/mod.rs

//! Domain models for the feed application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod format;
mod page;
mod state;

// Re-export all public types
pub use config::{Config, CrawlerConfig, FeedConfig, SourceConfig};
pub use format::{ScheduleFormat, ShardSelector, SummaryMode, SummaryStyle};
pub use page::{AnnouncementId, LabelKind, Page, Row, is_period_code, normalize_label};
pub use state::CrawlState;

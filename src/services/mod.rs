//! Service layer for the feed application.
//!
//! This module contains the business logic for:
//! - HTML documents and fetching (`Document`, `PageFetcher`)
//! - Announcement discovery (`LinkDiscoverer`)
//! - Schedule extraction (`parse_announcement`)

mod document;
mod fetcher;
mod links;
mod schedule;

pub use document::{Anchor, Document};
pub use fetcher::{Fetched, HttpFetcher, PageFetcher};
pub use links::LinkDiscoverer;
pub use schedule::{paragraph_row, parse_announcement};

#[cfg(test)]
pub(crate) use fetcher::testing;

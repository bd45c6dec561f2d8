//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::{AppError, Result};
use crate::models::AnnouncementId;

/// Path prefix of announcement pages.
pub const NEWS_PREFIX: &str = "/news/";

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the id out of an announcement path.
///
/// Returns `None` when the path is not under `/news/` at all. A path that is
/// under `/news/` but does not end in an integer means the site layout has
/// changed, which is reported as a structural error.
pub fn announcement_id(path: &str) -> Option<Result<AnnouncementId>> {
    let rest = path.strip_prefix(NEWS_PREFIX)?;
    Some(
        rest.parse::<AnnouncementId>()
            .map_err(|e| AppError::structure(path, format!("announcement id '{rest}': {e}"))),
    )
}

/// Parse the announcement id from a document URL, failing on any other path.
pub fn announcement_id_of(url: &Url) -> Result<AnnouncementId> {
    announcement_id(url.path()).unwrap_or_else(|| {
        Err(AppError::structure(
            url.as_str(),
            "not an announcement path",
        ))
    })
}

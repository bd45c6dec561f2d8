//! Atom feed assembly.

use std::collections::BTreeMap;

use atom_syndication::{Entry, Feed, Link};
use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{AnnouncementId, FeedConfig, Page, ScheduleFormat, SourceConfig};

fn html_link(href: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_mime_type(Some("text/html".to_string()));
    link
}

/// Build the feed: one entry per page, newest announcement first.
///
/// Entry id and link are the announcement URL; the title is the page
/// summary. Every entry shares the single `updated` timestamp.
pub fn build_feed(
    pages: &BTreeMap<AnnouncementId, Page>,
    feed_config: &FeedConfig,
    source: &SourceConfig,
    updated: DateTime<Utc>,
) -> Result<Feed> {
    let updated = updated.fixed_offset();

    let entries = pages
        .iter()
        .rev()
        .map(|(&id, page)| -> Result<Entry> {
            let url = source.announcement_url(id)?.to_string();
            let style = feed_config.summary.resolve(ScheduleFormat::detect(page));

            let mut entry = Entry::default();
            entry.set_id(url.clone());
            entry.set_title(style.render(page));
            entry.set_updated(updated);
            entry.set_links(vec![html_link(&url)]);
            Ok(entry)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut feed = Feed::default();
    feed.set_id(source.homepage.clone());
    feed.set_title(feed_config.title.clone());
    feed.set_updated(updated);
    feed.set_links(vec![html_link(&source.homepage)]);
    feed.set_entries(entries);
    Ok(feed)
}

/// Build the feed and serialise it as Atom XML.
pub fn render_feed(
    pages: &BTreeMap<AnnouncementId, Page>,
    feed_config: &FeedConfig,
    source: &SourceConfig,
    updated: DateTime<Utc>,
) -> Result<String> {
    let feed = build_feed(pages, feed_config, source, updated)?;
    let bytes = feed.write_to(Vec::new())?;
    String::from_utf8(bytes).map_err(|e| AppError::validation(format!("feed is not UTF-8: {e}")))
}

//! Announcement link discovery.
//!
//! Scans the homepage for `/news/<id>` links, records every id as seen and
//! selects the new ones whose link text names an outage schedule.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::models::{AnnouncementId, CrawlState, SourceConfig};
use crate::services::Document;
use crate::utils::announcement_id;

/// Finds new outage-schedule announcements on the homepage.
pub struct LinkDiscoverer<'a> {
    source: &'a SourceConfig,
}

impl<'a> LinkDiscoverer<'a> {
    pub fn new(source: &'a SourceConfig) -> Self {
        Self { source }
    }

    /// Return the ids that should be fetched.
    ///
    /// Every announcement id on the page is added to `state.seen`, whether or
    /// not its text matches a keyword, so a skipped announcement is never
    /// looked at again. An id is a candidate only if it was unseen before
    /// this call and at least one of its links carries a keyword.
    ///
    /// A `/news/` link whose suffix is not an integer aborts discovery.
    pub fn discover(
        &self,
        homepage: &Document,
        state: &mut CrawlState,
    ) -> Result<BTreeSet<AnnouncementId>> {
        let host = homepage.url().host_str();

        // Several anchors may point at one announcement (image + headline).
        let mut linked: BTreeMap<AnnouncementId, bool> = BTreeMap::new();
        for anchor in homepage.anchors()? {
            let Some(url) = anchor.url.as_ref() else {
                continue;
            };
            if url.host_str() != host {
                continue;
            }
            let Some(id) = announcement_id(url.path()) else {
                continue;
            };
            let id = id?;
            let matched = self.source.matches_keyword(&anchor.text);
            *linked.entry(id).or_default() |= matched;
        }

        let mut candidates = BTreeSet::new();
        for (id, matched) in linked {
            if !state.mark_seen(id) {
                log::debug!("Announcement {id} already seen");
                continue;
            }
            if matched {
                log::info!("New outage announcement {id}");
                candidates.insert(id);
            } else {
                log::debug!("Announcement {id} is not an outage schedule, skipping");
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::error::AppError;

    const HOMEPAGE: &str = r#"
        <html><body>
          <a href="/news/1001"><img src="x.jpg"></a>
          <a href="/news/1001">Графік погодинних відключень на 5 грудня</a>
          <a href="/news/1002">Графіки погодинних вимкнень</a>
          <a href="/news/1003">Планові ремонтні роботи</a>
          <a href="https://cherkasyoblenergo.com/news/1004">ГПВ: погодинних відключень немає</a>
          <a href="https://elsewhere.example/news/1005">погодинних відключень</a>
          <a href="/contacts">Контакти</a>
        </body></html>"#;

    fn homepage(body: &str) -> Document {
        Document::parse(Url::parse("https://cherkasyoblenergo.com/").unwrap(), body)
    }

    #[test]
    fn test_discover_selects_keyword_links() {
        let source = SourceConfig::default();
        let mut state = CrawlState::new();

        let ids = LinkDiscoverer::new(&source)
            .discover(&homepage(HOMEPAGE), &mut state)
            .unwrap();

        assert_eq!(ids, BTreeSet::from([1001, 1002, 1004]));
        assert_eq!(state.seen, BTreeSet::from([1001, 1002, 1003, 1004]));
    }

    #[test]
    fn test_second_discovery_reports_nothing_new() {
        let source = SourceConfig::default();
        let discoverer = LinkDiscoverer::new(&source);
        let mut state = CrawlState::new();

        let first = discoverer.discover(&homepage(HOMEPAGE), &mut state).unwrap();
        assert!(first.contains(&1001));

        let second = discoverer.discover(&homepage(HOMEPAGE), &mut state).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_non_matching_id_stays_skipped() {
        let source = SourceConfig::default();
        let discoverer = LinkDiscoverer::new(&source);
        let mut state = CrawlState::new();

        discoverer
            .discover(&homepage(r#"<a href="/news/7">Оголошення</a>"#), &mut state)
            .unwrap();
        // Retitled later; still never fetched.
        let ids = discoverer
            .discover(
                &homepage(r#"<a href="/news/7">Графік погодинних відключень</a>"#),
                &mut state,
            )
            .unwrap();
        assert!(ids.is_empty());
        assert!(state.pages.is_empty());
    }

    #[test]
    fn test_malformed_news_link_is_fatal() {
        let source = SourceConfig::default();
        let mut state = CrawlState::new();

        let result = LinkDiscoverer::new(&source).discover(
            &homepage(r#"<a href="/news/archive">Архів новин</a>"#),
            &mut state,
        );
        assert!(matches!(result, Err(AppError::Structure { .. })));
    }
}

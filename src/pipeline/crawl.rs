// src/pipeline/crawl.rs

//! Crawl update pipeline.

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::Result;
use crate::models::{Config, CrawlState, ShardSelector, SourceConfig};
use crate::pipeline::filter_pages;
use crate::services::{Fetched, LinkDiscoverer, PageFetcher, parse_announcement};
use crate::utils::NEWS_PREFIX;

/// Run one crawl cycle and return the updated state.
///
/// New announcement ids are committed to `seen` as soon as they are
/// discovered; matching announcements are fetched (at most `max_concurrent`
/// at a time) and parsed into `pages`. Pages from earlier cycles are kept.
///
/// Any error aborts the whole cycle. The state is taken by value, so a
/// caller that needs the previous state on failure keeps a copy.
pub async fn update(
    mut state: CrawlState,
    fetcher: &dyn PageFetcher,
    source: &SourceConfig,
    max_concurrent: usize,
) -> Result<CrawlState> {
    let homepage = fetcher.fetch(&source.homepage_url()?).await?;

    let targets = {
        let document = homepage.into_document();
        let ids = LinkDiscoverer::new(source).discover(&document, &mut state)?;
        ids.into_iter()
            .map(|id| document.resolve(&format!("{NEWS_PREFIX}{id}")))
            .collect::<Result<Vec<_>>>()?
    };

    if targets.is_empty() {
        log::info!("No new outage announcements");
        return Ok(state);
    }
    log::info!("Fetching {} new announcements", targets.len());

    let fetched: Vec<Fetched> = stream::iter(targets)
        .map(|url| async move { fetcher.fetch(&url).await })
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await?;

    for page in fetched {
        let (id, page) = parse_announcement(&page.into_document())?;
        log::info!("Announcement {id}: {} rows", page.rows.len());
        state.insert_page(id, page);
    }

    Ok(state)
}

/// Crawl once from an empty state and apply the shard filter.
pub async fn run_once(
    config: &Config,
    fetcher: &dyn PageFetcher,
    selector: Option<&ShardSelector>,
) -> Result<CrawlState> {
    let mut state = update(
        CrawlState::new(),
        fetcher,
        &config.source,
        config.crawler.max_concurrent,
    )
    .await?;

    if let Some(selector) = selector {
        filter_pages(&mut state.pages, selector);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Row;
    use crate::services::testing::StaticFetcher;

    const BASE: &str = "https://cherkasyoblenergo.com/";

    fn homepage(links: &[(u64, &str)]) -> String {
        let anchors: String = links
            .iter()
            .map(|(id, text)| format!(r#"<a href="/news/{id}">{text}</a>"#))
            .collect();
        format!("<html><body>{anchors}</body></html>")
    }

    fn hourly(title: &str) -> String {
        format!(
            "<html><head><title>{title}</title></head><body><table>\
             <tr><td>14:00-15:00</td><td>3, 4 та 5 черги</td></tr>\
             <tr><td>15:00-16:00</td><td>1 та 2 черги</td></tr>\
             </table></body></html>"
        )
    }

    fn fetcher() -> StaticFetcher {
        StaticFetcher::new()
            .with_page(
                BASE,
                &homepage(&[
                    (10, "Графік погодинних відключень на 1 грудня"),
                    (11, "Новини компанії"),
                ]),
            )
            .with_page(&format!("{BASE}news/10"), &hourly("ГПВ 1 грудня"))
    }

    #[tokio::test]
    async fn test_update_fetches_only_matching_links() {
        let fetcher = fetcher();
        let source = SourceConfig::default();

        let state = update(CrawlState::new(), &fetcher, &source, 2).await.unwrap();

        assert_eq!(state.seen.len(), 2);
        assert_eq!(state.pages.len(), 1);
        assert_eq!(state.pages[&10].title, "ГПВ 1 грудня");
        assert_eq!(
            fetcher.requests(),
            vec![BASE.to_string(), format!("{BASE}news/10")]
        );
    }

    #[tokio::test]
    async fn test_update_is_at_most_once() {
        let fetcher = fetcher();
        let source = SourceConfig::default();

        let mut state = update(CrawlState::new(), &fetcher, &source, 2).await.unwrap();
        state.take_pages();
        let state = update(state, &fetcher, &source, 2).await.unwrap();

        assert!(state.pages.is_empty());
        assert_eq!(fetcher.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_pages_accumulate_until_taken() {
        let mut fetcher = fetcher();
        let source = SourceConfig::default();

        let state = update(CrawlState::new(), &fetcher, &source, 1).await.unwrap();

        fetcher.set_page(
            BASE,
            &homepage(&[
                (12, "Графіки погодинних вимкнень на 2 грудня"),
                (10, "Графік погодинних відключень на 1 грудня"),
            ]),
        );
        fetcher.set_page(&format!("{BASE}news/12"), &hourly("ГПВ 2 грудня"));

        let state = update(state, &fetcher, &source, 1).await.unwrap();
        assert_eq!(state.pages.keys().copied().collect::<Vec<_>>(), vec![10, 12]);
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_update() {
        let fetcher = StaticFetcher::new().with_page(
            BASE,
            &homepage(&[(20, "Графік погодинних відключень")]),
        );
        let result = update(CrawlState::new(), &fetcher, &SourceConfig::default(), 1).await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_run_once_filters() {
        let fetcher = fetcher();
        let config = Config::default();

        let state = run_once(&config, &fetcher, Some(&ShardSelector::Number(4)))
            .await
            .unwrap();
        assert_eq!(
            state.pages[&10].rows,
            vec![Row::new("14:00-15:00", "3, 4 та 5 черги")]
        );
    }
}

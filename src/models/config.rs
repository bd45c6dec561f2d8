//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::format::SummaryMode;
use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Where announcements are discovered
    #[serde(default)]
    pub source: SourceConfig,

    /// Feed output and serving settings
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        self.source.homepage_url()?;
        if self.source.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(AppError::validation("No announcement keywords defined"));
        }
        if !self.feed.path.starts_with('/') {
            return Err(AppError::validation("feed.path must start with '/'"));
        }
        if self.feed.state_file.trim().is_empty() {
            return Err(AppError::validation("feed.state_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent announcement fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Announcement source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Homepage listing the latest announcements
    #[serde(default = "defaults::homepage")]
    pub homepage: String,

    /// Link text fragments that mark an outage schedule announcement
    #[serde(default = "defaults::keywords")]
    pub keywords: Vec<String>,
}

impl SourceConfig {
    pub fn homepage_url(&self) -> Result<Url> {
        Url::parse(&self.homepage)
            .map_err(|e| AppError::config(format!("source.homepage '{}': {e}", self.homepage)))
    }

    /// Public link of an announcement, e.g. `https://host/news/123`.
    pub fn announcement_url(&self, id: u64) -> Result<Url> {
        Ok(self.homepage_url()?.join(&format!("/news/{id}"))?)
    }

    /// Check link text against the announcement keywords.
    pub fn matches_keyword(&self, text: &str) -> bool {
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| text.contains(k.as_str()))
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            homepage: defaults::homepage(),
            keywords: defaults::keywords(),
        }
    }
}

/// Feed output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed title
    #[serde(default = "defaults::feed_title")]
    pub title: String,

    /// HTTP path the feed is served on
    #[serde(default = "defaults::feed_path")]
    pub path: String,

    /// Socket address of the feed server
    #[serde(default = "defaults::listen_addr")]
    pub listen_addr: String,

    /// JSON file holding the crawl state between runs
    #[serde(default = "defaults::state_file")]
    pub state_file: String,

    /// How entry titles are summarised
    #[serde(default)]
    pub summary: SummaryMode,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: defaults::feed_title(),
            path: defaults::feed_path(),
            listen_addr: defaults::listen_addr(),
            state_file: defaults::state_file(),
            summary: SummaryMode::default(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; gpv-feed/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Source defaults
    pub fn homepage() -> String {
        "https://cherkasyoblenergo.com/".into()
    }
    pub fn keywords() -> Vec<String> {
        vec![
            "погодинних відключень".into(),
            "погодинних вимкнень".into(),
        ]
    }

    // Feed defaults
    pub fn feed_title() -> String {
        "Cherkasy GPV".into()
    }
    pub fn feed_path() -> String {
        "/feed.xml".into()
    }
    pub fn listen_addr() -> String {
        "0.0.0.0:8091".into()
    }
    pub fn state_file() -> String {
        "ckgpv-state.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_homepage() {
        let mut config = Config::default();
        config.source.homepage = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [feed]
            title = "Черга 4"
            summary = "tabular"
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.title, "Черга 4");
        assert_eq!(config.feed.summary, SummaryMode::Tabular);
        assert_eq!(config.feed.path, "/feed.xml");
        assert_eq!(config.source.keywords.len(), 2);
    }

    #[test]
    fn sample_config_is_valid() {
        let config: Config = toml::from_str(include_str!("../../storage/config.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.feed.summary, SummaryMode::Auto);
    }

    #[test]
    fn announcement_url_uses_news_path() {
        let source = SourceConfig::default();
        assert_eq!(
            source.announcement_url(4321).unwrap().as_str(),
            "https://cherkasyoblenergo.com/news/4321"
        );
    }

    #[test]
    fn keywords_accept_both_spellings() {
        let source = SourceConfig::default();
        assert!(source.matches_keyword("Графік погодинних відключень на 12 грудня"));
        assert!(source.matches_keyword("Графіки погодинних вимкнень"));
        assert!(!source.matches_keyword("Планові ремонтні роботи"));
    }
}

//! Parsed HTML document with the accessors the crawler needs.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::normalize_whitespace;

/// An `<a href>` element found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// `href` resolved against the document URL, if it is a valid reference
    pub url: Option<Url>,
    /// Visible link text with whitespace collapsed
    pub text: String,
}

/// A fetched HTML page together with the URL it was served from.
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// URL the document was served from (after redirects).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Trimmed text content of every element matching `selector`, in
    /// document order.
    pub fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let sel = parse_selector(selector)?;
        Ok(self
            .html
            .select(&sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect())
    }

    /// Trimmed text of the first element matching `selector`, or an empty
    /// string when nothing matches.
    pub fn text(&self, selector: &str) -> Result<String> {
        let sel = parse_selector(selector)?;
        Ok(self
            .html
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default())
    }

    /// Every anchor carrying an `href`, in document order.
    pub fn anchors(&self) -> Result<Vec<Anchor>> {
        let sel = parse_selector("a[href]")?;
        Ok(self
            .html
            .select(&sel)
            .filter_map(|el| {
                let href = el.value().attr("href")?;
                Some(Anchor {
                    url: self.url.join(href).ok(),
                    text: normalize_whitespace(&el.text().collect::<String>()),
                })
            })
            .collect())
    }

    /// Resolve a relative reference against the document URL.
    pub fn resolve(&self, href: &str) -> Result<Url> {
        Ok(self.url.join(href)?)
    }
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

//! The `WebPage` facility: fetching, outbound-link extraction and raw word
//! scanning for a single page. Kept small and self-contained so the crawler
//! and indexer can each take only what they need from it.

use crate::{CoreError, Result};
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("corpus-pipeline-crawler/", env!("CARGO_PKG_VERSION"));

/// A single fetched (or not-yet-fetched) page.
#[derive(Debug, Clone)]
pub struct WebPage {
    url: Url,
    depth: u32,
    html: Option<String>,
}

impl WebPage {
    /// Creates a page at the given crawl depth, without fetching it yet.
    pub fn new(url: Url, depth: u32) -> Self {
        Self {
            url,
            depth,
            html: None,
        }
    }

    /// Parses `url_str` and creates an unfetched page at depth 0.
    pub fn seed(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str)?;
        Ok(Self::new(url, 0))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The stored HTML body. Panics if `fetch` hasn't succeeded yet — callers
    /// only ever reach for this after a successful fetch or a page load.
    pub fn html(&self) -> &str {
        self.html.as_deref().expect("page has not been fetched")
    }

    pub fn html_len(&self) -> usize {
        self.html().len()
    }

    pub fn set_html(&mut self, html: String) {
        self.html = Some(html);
    }

    /// Fetches the page body over HTTP, storing it on success.
    pub fn fetch(&mut self, client: &reqwest::blocking::Client) -> Result<()> {
        let response = client.get(self.url.clone()).send()?.error_for_status()?;
        let body = response.text()?;
        self.html = Some(body);
        Ok(())
    }

    /// Returns true if `url` shares a host with `root` — the crawl's target
    /// namespace.
    pub fn is_internal(url: &Url, root: &Url) -> bool {
        match (url.host_str(), root.host_str()) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }

    /// Extracts and resolves every outbound `<a href>` link on the page,
    /// keeping only http(s) targets.
    pub fn outbound_urls(&self) -> Vec<Url> {
        let html = self.html();
        let document = Html::parse_document(html);

        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| resolve_link(&self.url, href))
            .collect()
    }

    /// Iterates over raw candidate word tokens in the stored HTML: maximal
    /// runs of ASCII alphabetic bytes. Normalisation (length and casing) is
    /// the indexer's job, not this facility's.
    pub fn words(&self) -> WordScanner<'_> {
        scan_words(self.html())
    }
}

/// Iterates over maximal runs of ASCII alphabetic bytes in `text`. Exposed
/// standalone so callers holding a `PageRecord` rather than a live `WebPage`
/// (the indexer) can reuse the same low-level scanner.
pub fn scan_words(text: &str) -> WordScanner<'_> {
    WordScanner { remaining: text }
}

/// Builds the shared blocking HTTP client used by the crawler.
pub fn build_http_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(CoreError::from)
}

fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let trimmed = href.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("javascript:")
        || trimmed.starts_with("mailto:")
        || trimmed.starts_with("tel:")
        || trimmed.starts_with("data:")
    {
        return None;
    }

    let resolved = base.join(trimmed).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

/// Iterator yielding maximal runs of ASCII alphabetic characters.
pub struct WordScanner<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for WordScanner<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.remaining.as_bytes();
        let start = bytes.iter().position(|b| b.is_ascii_alphabetic())?;
        let end = bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .map(|offset| start + offset)
            .unwrap_or(bytes.len());

        let word = &self.remaining[start..end];
        self.remaining = &self.remaining[end..];
        Some(word)
    }
}

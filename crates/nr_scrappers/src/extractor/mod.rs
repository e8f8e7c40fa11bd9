use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use nr_core::{ArticleExtractor, Error, ExtractedArticle, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};

pub mod strategies;

use strategies::{default_strategies, visible_text, ContentStrategy};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";
const SEARCH_REFERER: &str = "https://search.naver.com/";
const LANGUAGES: &str = "ko-KR,ko;q=0.9,en-US;q=0.8";

lazy_static! {
    static ref HEADING: Selector = Selector::parse("h1").unwrap();
    static ref PAGE_TITLE: Selector = Selector::parse("title").unwrap();
}

/// Desktop browser headers, as if arriving from Naver search.
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static(SEARCH_REFERER));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANGUAGES));
    headers
}

/// Parses page HTML into title and body with an ordered strategy list.
pub struct HtmlParser {
    strategies: Vec<Box<dyn ContentStrategy>>,
}

impl HtmlParser {
    pub fn new(strategies: Vec<Box<dyn ContentStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn parse(&self, html: &str) -> ExtractedArticle {
        let document = Html::parse_document(html);

        let title = document
            .select(&HEADING)
            .next()
            .or_else(|| document.select(&PAGE_TITLE).next())
            .map(visible_text)
            .unwrap_or_default();

        let body = self
            .strategies
            .iter()
            .find_map(|strategy| {
                let body = strategy.extract(&document)?;
                tracing::trace!("Body matched by '{}'", strategy.name());
                Some(body)
            })
            .unwrap_or_default();

        ExtractedArticle { title, body }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new(default_strategies())
    }
}

/// Fetches news pages with browser-like headers and parses them.
pub struct HttpArticleExtractor {
    client: Client,
    parser: HtmlParser,
}

impl HttpArticleExtractor {
    pub fn new() -> Result<Self> {
        Self::with_parser(HtmlParser::default())
    }

    pub fn with_parser(parser: HtmlParser) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, parser })
    }
}

impl fmt::Debug for HttpArticleExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpArticleExtractor")
            .field("strategies", &self.parser.strategies.len())
            .finish()
    }
}

#[async_trait]
impl ArticleExtractor for HttpArticleExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", url, status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;

        Ok(self.parser.parse(&html))
    }
}

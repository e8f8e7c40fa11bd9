use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use nr_core::{Error, Result, SearchHit, SearchProvider};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::extractor::browser_headers;
use crate::extractor::strategies::visible_text;

pub const DEFAULT_NAVER_BASE_URL: &str = "https://search.naver.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SIZE: usize = 10;
/// A page with fewer cards than this is the last one.
const FULL_PAGE_MIN_CARDS: usize = 5;
const MAX_PAGES: usize = 10;

lazy_static! {
    static ref NEWS_AREA: Selector = Selector::parse("div.news_area").unwrap();
    static ref LIST_ITEM: Selector = Selector::parse("li.bx").unwrap();
    static ref TITLE_LINK: Selector = Selector::parse("a.news_tit").unwrap();
    static ref TITLE_ANY: Selector = Selector::parse(".news_tit").unwrap();
}

/// One parsed result page.
#[derive(Debug, Default)]
struct ResultPage {
    cards: usize,
    hits: Vec<SearchHit>,
}

/// Reads the news cards of a Naver search result page. Cards without a
/// title or link are counted but yield no hit.
fn parse_page(query: &str, html: &str) -> ResultPage {
    let document = Html::parse_document(html);
    let mut cards: Vec<_> = document.select(&NEWS_AREA).collect();
    if cards.is_empty() {
        cards = document.select(&LIST_ITEM).collect();
    }

    let hits = cards
        .iter()
        .filter_map(|card| {
            let link = card
                .select(&TITLE_LINK)
                .next()
                .or_else(|| card.select(&TITLE_ANY).next())?;
            let title = visible_text(link);
            let url = link.value().attr("href").unwrap_or_default().trim();
            if title.is_empty() || url.is_empty() {
                return None;
            }
            Some(SearchHit::new(query, title, url))
        })
        .collect();

    ResultPage {
        cards: cards.len(),
        hits,
    }
}

/// Naver news search, newest first, scraped from the HTML result pages.
///
/// Paging stops at `limit` hits, on a short page, or on the first page that
/// cannot be fetched. A failed page ends the search with what was collected
/// so far rather than failing it.
#[derive(Debug)]
pub struct NaverNewsSearch {
    client: Client,
    base_url: String,
}

impl NaverNewsSearch {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_NAVER_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Upstream(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_page(&self, query: &str, start: usize) -> Option<String> {
        let start = start.to_string();
        let response = self
            .client
            .get(format!("{}/search.naver", self.base_url))
            .query(&[
                ("where", "news"),
                ("query", query),
                ("sort", "1"),
                ("start", start.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("⚠️ Naver page {} for '{}' returned {}", start, query, response.status());
                return None;
            }
            Err(e) => {
                warn!("⚠️ Naver page {} for '{}' failed: {}", start, query, e);
                return None;
            }
        };

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("⚠️ Naver page {} for '{}' unreadable: {}", start, query, e);
                None
            }
        }
    }
}

#[async_trait]
impl SearchProvider for NaverNewsSearch {
    fn name(&self) -> &str {
        "Naver"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let mut hits = Vec::new();
        let mut start = 1;

        for _ in 0..MAX_PAGES {
            if hits.len() >= limit {
                break;
            }
            let Some(body) = self.fetch_page(query, start).await else {
                break;
            };

            let page = parse_page(query, &body);
            debug!("Naver page {} for '{}': {} cards", start, query, page.cards);
            if page.cards == 0 {
                break;
            }

            let room = limit - hits.len();
            hits.extend(page.hits.into_iter().take(room));
            if page.cards < FULL_PAGE_MIN_CARDS {
                break;
            }
            start += PAGE_SIZE;
        }

        Ok(hits)
    }
}

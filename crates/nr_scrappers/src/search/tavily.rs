use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nr_core::{Config, Error, Result, SearchHit, SearchProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    topic: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Tavily news search.
pub struct TavilyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Upstream(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.require_search_key()?, config.search_base_url.as_str())
    }
}

impl fmt::Debug for TavilyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TavilyClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Maps a raw response body to hits tagged with `query`.
fn parse_hits(query: &str, body: &str) -> Result<Vec<SearchHit>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| Error::Upstream(format!("Malformed search response for '{}': {}", query, e)))?;

    Ok(response
        .results
        .into_iter()
        .map(|r| SearchHit {
            query: query.to_string(),
            title: r.title.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
        })
        .collect())
}

#[async_trait]
impl SearchProvider for TavilyClient {
    fn name(&self) -> &str {
        "Tavily"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let request = SearchRequest {
            query,
            topic: "news",
            max_results: limit,
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Search request for '{}' failed: {}", query, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "Search provider returned {} for '{}'",
                status, query
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to read search response: {}", e)))?;

        parse_hits(query, &body)
    }
}

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use nr_core::{Config, Error, Result, SearchHit, SearchProvider};
use tracing::info;

pub mod naver;
pub mod tavily;

pub use naver::NaverNewsSearch;
pub use tavily::TavilyClient;

/// Which news-search source feeds the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    /// Tavily news search API (needs TAVILY_API_KEY)
    #[default]
    Tavily,
    /// Naver news search result pages, no key needed
    Naver,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Tavily => write!(f, "tavily"),
            SearchKind::Naver => write!(f, "naver"),
        }
    }
}

pub fn create_search(kind: SearchKind, config: &Config) -> Result<Arc<dyn SearchProvider>> {
    let search: Arc<dyn SearchProvider> = match kind {
        SearchKind::Tavily => Arc::new(TavilyClient::from_config(config)?),
        SearchKind::Naver => Arc::new(NaverNewsSearch::new()?),
    };
    info!("🔍 Search source ready: {}", search.name());
    Ok(search)
}

/// Runs every query against one provider and concatenates the hits in
/// query order. The first failing query aborts the whole fetch.
pub struct SourceFetcher {
    provider: Arc<dyn SearchProvider>,
}

impl SourceFetcher {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn fetch(&self, queries: &[String], limit: usize) -> Result<Vec<SearchHit>> {
        let mut hits = Vec::new();
        for query in queries {
            let mut batch = self.provider.search(query, limit).await.map_err(|e| match e {
                Error::Upstream(_) => e,
                other => Error::Upstream(other.to_string()),
            })?;
            info!("🔍 {} returned {} hits for '{}'", self.provider.name(), batch.len(), query);
            hits.append(&mut batch);
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockProvider;

    #[async_trait]
    impl SearchProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
            if query == "broken" {
                return Err(Error::Fetch("connection reset".to_string()));
            }
            Ok((0..limit)
                .map(|i| {
                    let url = format!("https://{}.com/{}", query, i);
                    SearchHit::new(query, format!("{} {}", query, i), url)
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_fetch_concatenates_in_query_order() {
        let fetcher = SourceFetcher::new(Arc::new(MockProvider));
        let hits = fetcher
            .fetch(&["a".to_string(), "b".to_string()], 2)
            .await
            .unwrap();
        let queries: Vec<&str> = hits.iter().map(|h| h.query.as_str()).collect();
        assert_eq!(queries, vec!["a", "a", "b", "b"]);
    }

    #[tokio::test]
    async fn test_one_failing_query_aborts_fetch() {
        let fetcher = SourceFetcher::new(Arc::new(MockProvider));
        let result = fetcher
            .fetch(&["a".to_string(), "broken".to_string()], 2)
            .await;
        assert!(matches!(result, Err(Error::Upstream(_))));
    }

    #[test]
    fn test_create_search() {
        let naver = create_search(SearchKind::Naver, &Config::default()).unwrap();
        assert_eq!(naver.name(), "Naver");

        let err = create_search(SearchKind::Tavily, &Config::default()).err();
        assert!(matches!(err, Some(Error::Config(_))));
        assert_eq!(SearchKind::default().to_string(), "tavily");
    }
}

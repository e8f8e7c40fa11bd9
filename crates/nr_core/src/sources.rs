use async_trait::async_trait;
use crate::types::{ExtractedArticle, SearchHit};
use crate::Result;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the name of the search provider
    fn name(&self) -> &str;

    /// Runs one news query. Any non-success response is an `Error::Upstream`.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>>;
}

#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Fetches `url` and pulls out its title and body text.
    ///
    /// Network failures and non-2xx responses are `Error::Fetch`; a page with
    /// no recognisable content is an empty, successful result.
    async fn extract(&self, url: &str) -> Result<ExtractedArticle>;
}

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use nr_core::{
    keywords, ArticleExtractor, ArticleRecord, CompanyProfile, Config, CorpusAnalysis, Error,
    Result, ResearchResult, SearchProvider, TextGenerator,
};
use nr_inference::{create_model, ChainInput, ModelKind, PromptChain};
use tracing::info;

use crate::extractor::HttpArticleExtractor;
use crate::filter::{ArticleFilter, MAX_RECORDS};
use crate::search::{create_search, SearchKind, SourceFetcher};

/// Knobs that select between the single-query and company-augmented runs.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub company: CompanyProfile,
    /// Results requested per search query, and the cap on kept articles.
    pub max_results: usize,
    /// Also search for "{keyword} {company}".
    pub augment_query: bool,
    /// Restrict the expert stage to articles that mention the company.
    pub filter_expert_corpus: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            company: CompanyProfile::default(),
            max_results: MAX_RECORDS,
            augment_query: false,
            filter_expert_corpus: true,
        }
    }
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            company: config.company.clone(),
            ..Self::default()
        }
    }
}

/// Keyword in, research result out: search, filter, prompt chain, keyword table.
pub struct ResearchPipeline {
    fetcher: SourceFetcher,
    filter: ArticleFilter,
    chain: PromptChain,
    options: PipelineOptions,
}

impl fmt::Debug for ResearchPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResearchPipeline")
            .field("search", &self.fetcher.provider_name())
            .field("model", &self.chain.model_name())
            .field("options", &self.options)
            .finish()
    }
}

impl ResearchPipeline {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        extractor: Arc<dyn ArticleExtractor>,
        model: Arc<dyn TextGenerator>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            fetcher: SourceFetcher::new(search),
            filter: ArticleFilter::new(extractor).with_max_records(options.max_results),
            chain: PromptChain::new(model),
            options,
        }
    }

    /// Wires the chosen search source, the HTTP extractor and the chosen model.
    pub fn from_config(
        config: &Config,
        search: SearchKind,
        model: ModelKind,
        options: PipelineOptions,
    ) -> Result<Self> {
        let search = create_search(search, config)?;
        let extractor = Arc::new(HttpArticleExtractor::new()?);
        let model = create_model(model, config)?;
        Ok(Self::new(search, extractor, model, options))
    }

    pub fn queries(&self, keyword: &str) -> Vec<String> {
        let mut queries = vec![keyword.to_string()];
        let company = self.options.company.name.trim();
        if self.options.augment_query && !company.is_empty() && !keyword.contains(company) {
            queries.push(format!("{} {}", keyword, company));
        }
        queries
    }

    /// Search and filter only; no generation.
    pub async fn collect(&self, keyword: &str) -> Result<Vec<ArticleRecord>> {
        let hits = self
            .fetcher
            .fetch(&self.queries(keyword), self.options.max_results)
            .await?;
        Ok(self.filter.process(hits).await)
    }

    pub async fn run(&self, keyword: &str) -> Result<ResearchResult> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::InvalidInput("keyword must not be empty".to_string()));
        }

        info!("🦗 Researching '{}' for {}", keyword, self.options.company.name);
        let articles = self.collect(keyword).await?;

        let output = self
            .chain
            .run(ChainInput {
                keyword,
                company: &self.options.company,
                articles: &articles,
                filter_expert_corpus: self.options.filter_expert_corpus,
            })
            .await?;

        let analysis = analyze_corpus(keyword, &articles);
        info!("✅ Research for '{}' complete: {}", keyword, analysis.summary);

        Ok(ResearchResult {
            keyword: keyword.to_string(),
            company: self.options.company.name.clone(),
            articles,
            market_report: output.market.text,
            expert_report: output.expert.text,
            strategy: output.strategy,
            analysis,
            generated_at: Utc::now(),
        })
    }
}

/// Article count, average body length and keyword table for the corpus.
pub fn analyze_corpus(keyword: &str, articles: &[ArticleRecord]) -> CorpusAnalysis {
    let num_articles = articles.len();
    let avg_length = if num_articles == 0 {
        0
    } else {
        articles.iter().map(|a| a.content.chars().count()).sum::<usize>() / num_articles
    };
    let bodies: Vec<&str> = articles.iter().map(|a| a.content.as_str()).collect();

    CorpusAnalysis {
        summary: format!(
            "키워드 '{}' 관련 뉴스 {}건 분석. 기사 평균 {}자.",
            keyword, num_articles, avg_length
        ),
        num_articles,
        avg_length,
        top_words: keywords::analyze(&bodies, keyword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nr_core::{ExtractedArticle, SearchHit};
    use nr_inference::models::DummyModel;
    use std::sync::Mutex;

    struct MockSearch {
        hits: Vec<SearchHit>,
        queries: Mutex<Vec<String>>,
        fail: bool,
    }

    impl MockSearch {
        fn new(hits: Vec<SearchHit>) -> Arc<Self> {
            Arc::new(Self {
                hits,
                queries: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                hits: Vec::new(),
                queries: Mutex::new(Vec::new()),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl SearchProvider for MockSearch {
        fn name(&self) -> &str {
            "mock"
        }

        async fn search(&self, query: &str, _limit: usize) -> Result<Vec<SearchHit>> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(Error::Upstream("status 401".to_string()));
            }
            Ok(self
                .hits
                .iter()
                .cloned()
                .map(|mut hit| {
                    hit.query = query.to_string();
                    hit
                })
                .collect())
        }
    }

    struct MockExtractor;

    #[async_trait]
    impl ArticleExtractor for MockExtractor {
        async fn extract(&self, url: &str) -> Result<ExtractedArticle> {
            Ok(ExtractedArticle {
                title: String::new(),
                body: format!("신약 개발 소식입니다. {} 대웅제약 임상 신약", url),
            })
        }
    }

    struct FailingModel;

    #[async_trait]
    impl TextGenerator for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String> {
            Err(Error::Generation("timed out".to_string()))
        }
    }

    fn hits() -> Vec<SearchHit> {
        vec![
            SearchHit::new("", "신약 허가 소식", "https://news.example.com/1"),
            SearchHit::new("", "인스타 게시물", "https://www.instagram.com/p/1"),
            SearchHit::new("", "임상 결과 발표", "https://news.example.com/2"),
        ]
    }

    fn pipeline(search: Arc<MockSearch>, options: PipelineOptions) -> ResearchPipeline {
        ResearchPipeline::new(search, Arc::new(MockExtractor), Arc::new(DummyModel::new()), options)
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let search = MockSearch::new(hits());
        let result = pipeline(search, PipelineOptions::default())
            .run("  신약 ")
            .await
            .unwrap();

        assert_eq!(result.keyword, "신약");
        assert_eq!(result.company, "대웅제약");
        assert_eq!(result.articles.len(), 2);
        assert!(result.articles.iter().all(|a| a.domain == "news.example.com"));
        assert!(!result.market_report.is_empty());
        assert!(result.strategy.short_term.starts_with("## 단기 전략"));
        assert!(result.strategy.mid_term.starts_with("## 중기 전략"));
        assert_eq!(result.strategy.sources.len(), 2);
        assert_eq!(result.analysis.num_articles, 2);
        assert!(result.analysis.top_words.iter().all(|k| k.token != "신약"));
    }

    #[tokio::test]
    async fn test_augmented_queries_merge_duplicates() {
        let search = MockSearch::new(hits());
        let options = PipelineOptions {
            augment_query: true,
            ..PipelineOptions::default()
        };
        let pipeline = pipeline(search.clone(), options);

        assert_eq!(pipeline.queries("신약"), vec!["신약".to_string(), "신약 대웅제약".to_string()]);
        assert_eq!(pipeline.queries("대웅제약 신약"), vec!["대웅제약 신약".to_string()]);

        let articles = pipeline.collect("신약").await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(search.queries.lock().unwrap().len(), 2);
        assert!(articles.iter().all(|a| a.keyword == "신약"));
    }

    #[tokio::test]
    async fn test_max_results_caps_articles() {
        let options = PipelineOptions {
            max_results: 1,
            ..PipelineOptions::default()
        };
        let result = pipeline(MockSearch::new(hits()), options).run("신약").await.unwrap();
        assert_eq!(result.articles.len(), 1);
        assert_eq!(result.articles[0].url, "https://news.example.com/1");
    }

    #[tokio::test]
    async fn test_zero_articles_still_generates() {
        let search = MockSearch::new(vec![]);
        let result = pipeline(search, PipelineOptions::default())
            .run("신약")
            .await
            .unwrap();

        assert!(result.articles.is_empty());
        assert!(result.expert_report.contains("수집된 뉴스 정보가 부족합니다."));
        assert!(result.analysis.top_words.is_empty());
        assert_eq!(result.analysis.avg_length, 0);
    }

    #[tokio::test]
    async fn test_upstream_error_is_fatal() {
        let result = pipeline(MockSearch::failing(), PipelineOptions::default())
            .run("신약")
            .await;
        assert!(matches!(result, Err(Error::Upstream(_))));
    }

    #[tokio::test]
    async fn test_generation_error_is_fatal() {
        let pipeline = ResearchPipeline::new(
            MockSearch::new(hits()),
            Arc::new(MockExtractor),
            Arc::new(FailingModel),
            PipelineOptions::default(),
        );
        let result = pipeline.run("신약").await;
        assert!(matches!(result, Err(Error::Generation(_))));
    }

    #[tokio::test]
    async fn test_empty_keyword_rejected() {
        let search = MockSearch::new(hits());
        let result = pipeline(search.clone(), PipelineOptions::default()).run("   ").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(search.queries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_analyze_corpus() {
        let record = |body: &str| {
            ArticleRecord::from_hit(
                &SearchHit::new("k", body, format!("https://a.com/{}", body.len())),
                "a.com".to_string(),
                ExtractedArticle {
                    title: body.to_string(),
                    body: body.to_string(),
                },
            )
        };
        let articles = vec![record("가나 다라"), record("가나 마바사 아")];
        let analysis = analyze_corpus("다라", &articles);
        assert_eq!(analysis.num_articles, 2);
        assert_eq!(analysis.avg_length, (5 + 8) / 2);
        assert_eq!(analysis.top_words[0].token, "가나");
        assert_eq!(analysis.top_words[0].count, 2);
        assert!(analysis.top_words.iter().all(|k| k.token != "다라"));
        assert!(analysis.summary.contains("2건"));
    }
}

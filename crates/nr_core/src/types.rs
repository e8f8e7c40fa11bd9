use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw search-result row, before extraction and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub query: String,
    pub title: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(query: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Title and body text pulled out of a fetched page. Both may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub body: String,
}

/// A fully extracted, filtered and deduplicated article.
///
/// `domain` is derived from `url` once, when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub keyword: String,
    pub source_title: String,
    pub article_title: String,
    pub url: String,
    pub domain: String,
    pub content: String,
    pub summary: String,
}

impl ArticleRecord {
    /// Builds a record from a surviving hit and its extracted page.
    pub fn from_hit(hit: &SearchHit, domain: String, article: ExtractedArticle) -> Self {
        let article_title = if article.title.is_empty() {
            hit.title.clone()
        } else {
            article.title
        };
        let summary = crate::text::summarize(&article.body, crate::text::DEFAULT_SUMMARY_CHARS);

        Self {
            keyword: hit.query.clone(),
            source_title: hit.title.clone(),
            article_title,
            url: hit.url.clone(),
            domain,
            content: article.body,
            summary,
        }
    }

    /// True when the keyword, title or body mentions any of `terms`.
    pub fn mentions_any(&self, terms: &[String]) -> bool {
        terms.iter().filter(|t| !t.is_empty()).any(|term| {
            self.keyword.contains(term.as_str())
                || self.article_title.contains(term.as_str())
                || self.source_title.contains(term.as_str())
                || self.content.contains(term.as_str())
        })
    }

    pub fn source_info(&self) -> SourceInfo {
        SourceInfo {
            url: self.url.clone(),
            domain: self.domain.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub domain: String,
}

/// Final strategist output. `short_term` and `mid_term` are best-effort
/// heading extractions and are empty when the heading is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub full_report: String,
    pub short_term: String,
    pub mid_term: String,
    pub sources: Vec<SourceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusAnalysis {
    pub summary: String,
    pub num_articles: usize,
    pub avg_length: usize,
    pub top_words: Vec<KeywordCount>,
}

/// Everything one research request produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    pub keyword: String,
    pub company: String,
    pub articles: Vec<ArticleRecord>,
    pub market_report: String,
    pub expert_report: String,
    pub strategy: ReportBundle,
    pub analysis: CorpusAnalysis,
    pub generated_at: DateTime<Utc>,
}

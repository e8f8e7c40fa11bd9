pub mod config;
pub mod error;
pub mod keywords;
pub mod models;
pub mod sources;
pub mod text;
pub mod types;

pub use config::{CompanyProfile, Config};
pub use error::{Error, Result};
pub use models::TextGenerator;
pub use sources::{ArticleExtractor, SearchProvider};
pub use types::{
    ArticleRecord, CorpusAnalysis, ExtractedArticle, KeywordCount, ReportBundle, ResearchResult,
    SearchHit, SourceInfo,
};

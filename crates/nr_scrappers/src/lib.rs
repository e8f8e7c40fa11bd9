pub mod cli;
pub mod extractor;
pub mod filter;
pub mod logging;
pub mod manager;
pub mod search;

#[cfg(test)]
mod test_utils;

pub use cli::{handle_command, ResearchArgs};
pub use extractor::HttpArticleExtractor;
pub use filter::ArticleFilter;
pub use logging::init_logging;
pub use manager::{PipelineOptions, ResearchPipeline};
pub use search::{create_search, NaverNewsSearch, SearchKind, SourceFetcher, TavilyClient};

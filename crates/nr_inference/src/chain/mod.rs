//! Three-stage prompt chain: market analyst, company expert, strategist.
//!
//! Stages run strictly in order and each one sees the previous stage's
//! output. Any generation failure aborts the chain; there is no retry and
//! no partial report.

use std::fmt;
use std::sync::Arc;

use nr_core::{ArticleRecord, CompanyProfile, ReportBundle, Result, TextGenerator};
use tracing::info;

pub mod digest;
pub mod expert;
pub mod market;
pub mod strategist;

pub use expert::{ExpertInput, ExpertReport};
pub use market::{MarketInput, MarketReport};
pub use strategist::StrategyInput;

/// Temperature for the market and expert stages.
pub const FACTUAL_TEMPERATURE: f32 = 0.3;
/// Temperature for the strategist stage.
pub const STRATEGY_TEMPERATURE: f32 = 0.4;

#[derive(Debug, Clone, Copy)]
pub struct ChainInput<'a> {
    pub keyword: &'a str,
    pub company: &'a CompanyProfile,
    pub articles: &'a [ArticleRecord],
    pub filter_expert_corpus: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ChainOutput {
    pub market: MarketReport,
    pub expert: ExpertReport,
    pub strategy: ReportBundle,
}

pub struct PromptChain {
    model: Arc<dyn TextGenerator>,
}

impl fmt::Debug for PromptChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptChain")
            .field("model", &self.model.name())
            .finish()
    }
}

impl PromptChain {
    pub fn new(model: Arc<dyn TextGenerator>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn market(&self, input: MarketInput<'_>) -> Result<MarketReport> {
        let prompt = market::market_prompt(&input);
        let text = self.model.generate(&prompt, FACTUAL_TEMPERATURE).await?;
        Ok(MarketReport { text })
    }

    pub async fn expert(&self, input: ExpertInput<'_>) -> Result<ExpertReport> {
        let (prompt, used_company_subset) = expert::expert_prompt(&input);
        if input.filter_corpus && !used_company_subset {
            info!(
                "🔎 No article mentions {}, expert stage falls back to the full corpus",
                input.company.name
            );
        }
        let text = self.model.generate(&prompt, FACTUAL_TEMPERATURE).await?;
        Ok(ExpertReport {
            text,
            used_company_subset,
        })
    }

    pub async fn strategist(&self, input: StrategyInput<'_>) -> Result<ReportBundle> {
        let prompt = strategist::strategy_prompt(&input);
        let text = self.model.generate(&prompt, STRATEGY_TEMPERATURE).await?;
        let bundle = strategist::bundle(text, input.articles);
        if bundle.short_term.is_empty() || bundle.mid_term.is_empty() {
            tracing::debug!("Strategy report is missing a short/mid-term heading");
        }
        Ok(bundle)
    }

    pub async fn run(&self, input: ChainInput<'_>) -> Result<ChainOutput> {
        info!("📈 Market stage for '{}' ({} articles)", input.keyword, input.articles.len());
        let market = self
            .market(MarketInput {
                keyword: input.keyword,
                articles: input.articles,
            })
            .await?;

        info!("🏢 Expert stage for {}", input.company.name);
        let expert = self
            .expert(ExpertInput {
                keyword: input.keyword,
                company: input.company,
                articles: input.articles,
                market_report: &market.text,
                filter_corpus: input.filter_expert_corpus,
            })
            .await?;

        info!("🧭 Strategist stage");
        let strategy = self
            .strategist(StrategyInput {
                keyword: input.keyword,
                company: input.company,
                articles: input.articles,
                expert_report: &expert.text,
            })
            .await?;

        Ok(ChainOutput {
            market,
            expert,
            strategy,
        })
    }
}

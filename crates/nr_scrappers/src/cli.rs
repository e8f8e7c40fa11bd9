use std::fmt::Write;

use clap::Args;
use nr_core::{Result, ResearchResult};

use crate::manager::ResearchPipeline;

#[derive(Args, Debug, Clone)]
pub struct ResearchArgs {
    /// Keyword to research (e.g. "비만 치료제")
    pub keyword: String,
    /// Print the full result as JSON instead of a text report
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_command(args: ResearchArgs, pipeline: &ResearchPipeline) -> Result<()> {
    let result = pipeline.run(&args.keyword).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

/// Plain-text rendering of a research result for the terminal.
pub fn render_text(result: &ResearchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} / {}", result.keyword, result.company);
    let _ = writeln!(out, "{}\n", result.analysis.summary);

    let _ = writeln!(out, "## 기사 ({})", result.articles.len());
    for article in &result.articles {
        let _ = writeln!(out, "- {} [{}]", article.article_title, article.domain);
        if !article.summary.is_empty() {
            let _ = writeln!(out, "  {}", article.summary);
        }
    }

    for (heading, body) in [
        ("시장 동향", result.market_report.as_str()),
        ("기회 요인", result.expert_report.as_str()),
        ("실행 전략", result.strategy.full_report.as_str()),
    ] {
        let _ = writeln!(out, "\n## {}\n{}", heading, body);
    }

    if !result.strategy.sources.is_empty() {
        let _ = writeln!(out, "\n## 출처");
        for source in &result.strategy.sources {
            let _ = writeln!(out, "- {} ({})", source.url, source.domain);
        }
    }

    if !result.analysis.top_words.is_empty() {
        let words: Vec<String> = result
            .analysis
            .top_words
            .iter()
            .map(|k| format!("{}({})", k.token, k.count))
            .collect();
        let _ = writeln!(out, "\n## 주요 키워드\n{}", words.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nr_core::{CorpusAnalysis, KeywordCount, ReportBundle, SourceInfo};

    #[test]
    fn test_render_text() {
        let result = ResearchResult {
            keyword: "신약".to_string(),
            company: "대웅제약".to_string(),
            articles: vec![],
            market_report: "시장 보고".to_string(),
            expert_report: "전문가 보고".to_string(),
            strategy: ReportBundle {
                full_report: "전략".to_string(),
                short_term: String::new(),
                mid_term: String::new(),
                sources: vec![SourceInfo {
                    url: "https://a.com/1".to_string(),
                    domain: "a.com".to_string(),
                }],
            },
            analysis: CorpusAnalysis {
                summary: "요약".to_string(),
                num_articles: 0,
                avg_length: 0,
                top_words: vec![KeywordCount {
                    token: "임상".to_string(),
                    count: 3,
                }],
            },
            generated_at: Utc::now(),
        };

        let text = render_text(&result);
        assert!(text.starts_with("# 신약 / 대웅제약\n"));
        assert!(text.contains("## 시장 동향\n시장 보고"));
        assert!(text.contains("- https://a.com/1 (a.com)"));
        assert!(text.contains("임상(3)"));
    }
}

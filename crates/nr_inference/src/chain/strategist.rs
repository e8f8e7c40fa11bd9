use nr_core::{ArticleRecord, CompanyProfile, ReportBundle};

use super::digest::build_digest;
use crate::sections;

/// Number of records listed as sources under the strategy report.
pub const SOURCE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct StrategyInput<'a> {
    pub keyword: &'a str,
    pub company: &'a CompanyProfile,
    pub articles: &'a [ArticleRecord],
    pub expert_report: &'a str,
}

pub fn strategy_prompt(input: &StrategyInput<'_>) -> String {
    let digest = build_digest(input.articles, false);
    format!(
        r#"너는 대한민국 1등 제약 전략 컨설턴트다.
앞서 분석된 기회 요인들을 바탕으로 {company}가 '{keyword}' 이슈를 시장 점유율 확대와
성장 동력으로 만들기 위한 **실행 전략 보고서**를 한국어로 작성해라.

작성 구조:
## 1. 전략적 기회 개요 (Executive Summary)
## 2. {company} 맞춤형 대응 전략
   - 신약 R&D/인허가 관점
   - 시장 선점 및 마케팅 관점
## 3. 실행 로드맵
## {short} (3개월)
## {mid} (1년)
## 4. 기대 효과 및 성과 지표 (KPI)
## 5. 리스크 관리 방안

분량: 1000~1300자. 논리적이고 전문적인 비즈니스 톤 유지.

[시장 뉴스 자료 요약]
{digest}

[{company} 기회 요인 분석 보고]
{expert}"#,
        company = input.company.name,
        keyword = input.keyword,
        short = sections::SHORT_TERM_LABEL,
        mid = sections::MID_TERM_LABEL,
        digest = digest,
        expert = input.expert_report.trim(),
    )
}

/// Splits the generated strategy text into the report bundle.
pub fn bundle(strategy_text: String, articles: &[ArticleRecord]) -> ReportBundle {
    ReportBundle {
        short_term: sections::short_term(&strategy_text),
        mid_term: sections::mid_term(&strategy_text),
        sources: articles.iter().take(SOURCE_LIMIT).map(ArticleRecord::source_info).collect(),
        full_report: strategy_text,
    }
}

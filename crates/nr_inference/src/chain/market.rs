use nr_core::ArticleRecord;

use super::digest::build_digest;

#[derive(Debug, Clone, Copy)]
pub struct MarketInput<'a> {
    pub keyword: &'a str,
    pub articles: &'a [ArticleRecord],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketReport {
    pub text: String,
}

pub fn market_prompt(input: &MarketInput<'_>) -> String {
    let digest = build_digest(input.articles, true);
    format!(
        r#"너는 제약·바이오 산업을 담당하는 시장 분석가다.
제공된 뉴스 자료만을 근거로 '{keyword}' 관련 **시장 동향 보고서**를 한국어로 작성해라.

작성 구조:
1. 핵심 이슈 요약 (3~4줄)
2. 주요 기업 및 경쟁 구도
3. 규제·정책 동향
4. 향후 시장 전망 (2~3줄)

분량: 500~700자. 자료에 없는 수치나 사실은 단정하지 말 것.

[시장 뉴스 자료]
{digest}"#,
        keyword = input.keyword,
        digest = digest,
    )
}

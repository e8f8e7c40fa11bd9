use nr_core::{ArticleRecord, CompanyProfile};

use super::digest::build_digest;

pub const GENERAL_INFERENCE_NOTE: &str = "※ 회사를 직접 언급한 기사가 없다. \
    아래 일반 시장 자료에서 합리적으로 추론하되, \
    확인되지 않은 사실을 단정하지 말고 추론임을 밝혀라.";

#[derive(Debug, Clone, Copy)]
pub struct ExpertInput<'a> {
    pub keyword: &'a str,
    pub company: &'a CompanyProfile,
    pub articles: &'a [ArticleRecord],
    pub market_report: &'a str,
    /// Restrict the digest to articles that mention the company.
    pub filter_corpus: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpertReport {
    pub text: String,
    /// False when no article mentioned the company and the full corpus was used.
    pub used_company_subset: bool,
}

/// Builds the expert prompt and reports whether the company-filtered
/// subset was used.
pub fn expert_prompt(input: &ExpertInput<'_>) -> (String, bool) {
    let terms = input.company.terms();
    let relevant: Vec<&ArticleRecord> = if input.filter_corpus {
        input.articles.iter().filter(|a| a.mentions_any(&terms)).collect()
    } else {
        input.articles.iter().collect()
    };

    let used_subset = input.filter_corpus && !relevant.is_empty();
    let (digest, note) = if relevant.is_empty() && input.filter_corpus {
        (build_digest(input.articles, false), format!("\n{}\n", GENERAL_INFERENCE_NOTE))
    } else {
        (build_digest(relevant, false), String::new())
    };

    let market = if input.market_report.trim().is_empty() {
        "(시장 동향 보고 없음)"
    } else {
        input.market_report.trim()
    };

    let prompt = format!(
        r#"너는 {company}의 전략기획팀 전문 분석가다.
제공된 시장 뉴스 자료를 바탕으로 '{keyword}' 이슈가 {company}에게 주는 **비즈니스 기회와 전략적 활용 방안**을 한국어로 보고해라.

작성 구조:
1. 시장 트렌드 핵심 요약 (2~3줄)
2. {company}가 주목해야 할 3대 기회 요인 (각 요인별 상세 설명)
3. {company}의 핵심 역량과의 접점 (R&D, 영업망, 제조시설 등 연계)
4. 활용 시 예상되는 장벽 및 해결 방향 (2줄)

분량: 600~800자. 구체적인 제약사 시각에서 분석할 것.
{note}
[시장 동향 보고]
{market}

[시장 뉴스 자료]
{digest}"#,
        company = input.company.name,
        keyword = input.keyword,
        note = note,
        market = market,
        digest = digest,
    );

    (prompt, used_subset)
}

use nr_core::ArticleRecord;

/// Maximum number of articles quoted in any stage prompt.
pub const DIGEST_LIMIT: usize = 10;

pub const NO_ARTICLES_PLACEHOLDER: &str = "수집된 뉴스 정보가 부족합니다.";

/// Renders up to ten records as prompt bullets: title and summary, plus the
/// url when `with_url` is set. No records yields a single placeholder line.
pub fn build_digest<'a, I>(records: I, with_url: bool) -> String
where
    I: IntoIterator<Item = &'a ArticleRecord>,
{
    let bullets: Vec<String> = records
        .into_iter()
        .take(DIGEST_LIMIT)
        .map(|record| {
            let mut bullet = format!(
                "- 제목: {}\n  요약: {}",
                record.article_title, record.summary
            );
            if with_url {
                bullet.push_str(&format!("\n  출처: {}", record.url));
            }
            bullet
        })
        .collect();

    if bullets.is_empty() {
        format!("- {}", NO_ARTICLES_PLACEHOLDER)
    } else {
        bullets.join("\n")
    }
}

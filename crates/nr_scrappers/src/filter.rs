use std::collections::HashSet;
use std::sync::Arc;

use nr_core::text::domain_of;
use nr_core::{ArticleExtractor, ArticleRecord, SearchHit};
use tracing::{debug, info, warn};

/// Social and blog platforms with no editorial review.
pub const BLOCKED_DOMAINS: [&str; 7] = [
    "blog.naver.com",
    "tistory.com",
    "cafe.naver.com",
    "instagram.com",
    "facebook.com",
    "twitter.com",
    "x.com",
];

pub const MAX_RECORDS: usize = 20;
pub const TITLE_KEY_CHARS: usize = 20;

/// True when `domain` (host, optionally with port) is a blocked platform or
/// one of its subdomains.
pub fn is_blocked_domain(domain: &str) -> bool {
    let host = domain.split(':').next().unwrap_or_default().to_lowercase();
    BLOCKED_DOMAINS.iter().any(|blocked| {
        host == *blocked
            || host
                .strip_suffix(blocked)
                .map_or(false, |prefix| prefix.ends_with('.'))
    })
}

/// Near-duplicate fingerprint: the first 20 characters of the title.
pub fn title_key(title: &str) -> String {
    title.chars().take(TITLE_KEY_CHARS).collect()
}

/// Drops exact url duplicates across queries, keeping the first occurrence.
pub fn merge_hits(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| seen.insert(hit.url.clone()))
        .collect()
}

/// Turns raw hits into at most twenty deduplicated, extracted records, in
/// hit order. Every gate skips; nothing here fails the batch.
pub struct ArticleFilter {
    extractor: Arc<dyn ArticleExtractor>,
    max_records: usize,
}

impl ArticleFilter {
    pub fn new(extractor: Arc<dyn ArticleExtractor>) -> Self {
        Self {
            extractor,
            max_records: MAX_RECORDS,
        }
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records.min(MAX_RECORDS);
        self
    }

    pub async fn process(&self, hits: Vec<SearchHit>) -> Vec<ArticleRecord> {
        let hits = merge_hits(hits);
        let total = hits.len();
        let mut seen_titles = HashSet::new();
        let mut records = Vec::new();

        for hit in hits {
            if records.len() >= self.max_records {
                break;
            }
            if hit.url.is_empty() {
                debug!("Skipping hit without url: {}", hit.title);
                continue;
            }

            let domain = domain_of(&hit.url);
            if is_blocked_domain(&domain) {
                debug!("Skipping blocked domain {}", domain);
                continue;
            }

            let article = match self.extractor.extract(&hit.url).await {
                Ok(article) => article,
                Err(e) => {
                    warn!("⚠️ Skipping {}: {}", hit.url, e);
                    continue;
                }
            };

            let record = ArticleRecord::from_hit(&hit, domain, article);
            if !seen_titles.insert(title_key(&record.article_title)) {
                debug!("Skipping near-duplicate title: {}", record.article_title);
                continue;
            }
            records.push(record);
        }

        info!("📰 Kept {} of {} hits", records.len(), total);
        records
    }
}

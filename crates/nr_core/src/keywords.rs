use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::KeywordCount;

pub const TOP_KEYWORDS: usize = 20;

/// Common Korean function words that carry no topic signal.
pub const STOPWORDS: [&str; 16] = [
    "그리고", "하지만", "이번", "대한", "관련", "통해", "있는", "한다",
    "하는", "위한", "있다", "이다", "했다", "됩니다", "것이", "대해",
];

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"[A-Za-z0-9가-힣]{2,}").unwrap();
}

/// Ranks the tokens of `bodies` by frequency, skipping stopwords and the
/// search keyword itself. Ties keep first-seen order.
pub fn analyze<S: AsRef<str>>(bodies: &[S], excluded_keyword: &str) -> Vec<KeywordCount> {
    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for body in bodies {
        for token in TOKEN.find_iter(body.as_ref()).map(|m| m.as_str()) {
            if token == excluded_keyword || STOPWORDS.contains(&token) {
                continue;
            }
            match order.get(token) {
                Some(&idx) => counts[idx].count += 1,
                None => {
                    order.insert(token, counts.len());
                    counts.push(KeywordCount {
                        token: token.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    // sort_by is stable, so equal counts stay in insertion order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_KEYWORDS);
    counts
}

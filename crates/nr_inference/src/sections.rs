//! Best-effort extraction of labelled `##` sections from generated reports.
//!
//! The generator is asked for these headings but nothing guarantees it uses
//! them. A heading that is missing, renamed or translated yields an empty
//! string, never an error.

use lazy_static::lazy_static;
use regex::Regex;

pub const SHORT_TERM_LABEL: &str = "단기 전략";
pub const MID_TERM_LABEL: &str = "중기 전략";

lazy_static! {
    static ref SHORT_TERM: Regex = heading(SHORT_TERM_LABEL);
    static ref MID_TERM: Regex = heading(MID_TERM_LABEL);
}

fn heading(label: &str) -> Regex {
    Regex::new(&format!(r"##\s*{}", regex::escape(label))).unwrap()
}

/// Text from the heading up to the next `##` marker or the end, trimmed.
fn extract(pattern: &Regex, text: &str) -> String {
    let Some(found) = pattern.find(text) else {
        return String::new();
    };
    let rest = &text[found.end()..];
    let end = rest
        .find("##")
        .map(|offset| found.end() + offset)
        .unwrap_or(text.len());
    text[found.start()..end].trim().to_string()
}

pub fn short_term(text: &str) -> String {
    extract(&SHORT_TERM, text)
}

pub fn mid_term(text: &str) -> String {
    extract(&MID_TERM, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "## 1. 개요\n내용\n\
        ## 단기 전략 (3개월)\n- 항목 A\n- 항목 B\n\n\
        ##중기 전략 (1년)\n- 항목 C\n";

    #[test]
    fn test_extracts_until_next_heading() {
        assert_eq!(short_term(REPORT), "## 단기 전략 (3개월)\n- 항목 A\n- 항목 B");
    }

    #[test]
    fn test_extracts_until_end() {
        assert_eq!(mid_term(REPORT), "##중기 전략 (1년)\n- 항목 C");
    }

    #[test]
    fn test_missing_heading_is_empty() {
        let text = "## 3. 실행 로드맵 (단기: 3개월 / 중기: 1년)\n내용";
        assert_eq!(short_term(text), "");
        assert_eq!(mid_term(text), "");
        assert_eq!(short_term(""), "");
    }

    #[test]
    fn test_sections_are_independent() {
        let text = "## 중기 전략\n- 먼저 나온 중기\n";
        assert_eq!(short_term(text), "");
        assert_eq!(mid_term(text), "## 중기 전략\n- 먼저 나온 중기");
    }
}

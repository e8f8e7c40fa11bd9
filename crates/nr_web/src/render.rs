//! Server-side HTML for the keyword form and the research result page.

use std::fmt::Write;

use nr_core::ResearchResult;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;\
padding:0 1rem;line-height:1.6}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:1rem}\
.notice{background:#fff3cd;padding:.75rem}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:.25rem .5rem}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn form(out: &mut String, keyword: &str) {
    let _ = write!(
        out,
        concat!(
            r#"<form method="post" action="/">"#,
            r#"<input type="text" name="keyword" value="{}" placeholder="키워드 입력" required> "#,
            r#"<button type="submit">분석</button></form>"#,
        ),
        escape(keyword)
    );
}

fn report(out: &mut String, heading: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    let _ = write!(
        out,
        "<section><h2>{}</h2><pre>{}</pre></section>",
        escape(heading),
        escape(body)
    );
}

fn results(out: &mut String, result: &ResearchResult) {
    let _ = write!(out, "<p>{}</p>", escape(&result.analysis.summary));

    report(out, "시장 동향 보고", &result.market_report);
    report(out, &format!("{} 기회 요인 분석", result.company), &result.expert_report);
    report(out, "실행 전략 보고서", &result.strategy.full_report);
    report(out, "단기 전략", &result.strategy.short_term);
    report(out, "중기 전략", &result.strategy.mid_term);

    if !result.strategy.sources.is_empty() {
        out.push_str("<section><h2>참고 출처</h2><ul>");
        for source in &result.strategy.sources {
            let _ = write!(
                out,
                r#"<li><a href="{}" rel="noopener" target="_blank">{}</a></li>"#,
                escape(&source.url),
                escape(&source.domain)
            );
        }
        out.push_str("</ul></section>");
    }

    if !result.analysis.top_words.is_empty() {
        out.push_str("<section><h2>주요 키워드</h2><table><tr><th>키워드</th><th>빈도</th></tr>");
        for word in &result.analysis.top_words {
            let _ = write!(out, "<tr><td>{}</td><td>{}</td></tr>", escape(&word.token), word.count);
        }
        out.push_str("</table></section>");
    }

    let _ = write!(out, "<section><h2>수집 기사 ({})</h2><ol>", result.articles.len());
    for article in &result.articles {
        let _ = write!(
            out,
            concat!(
                r#"<li><a href="{}" rel="noopener" target="_blank">{}</a> "#,
                "<small>{}</small><br>{}</li>",
            ),
            escape(&article.url),
            escape(&article.article_title),
            escape(&article.domain),
            escape(&article.summary)
        );
    }
    out.push_str("</ol></section>");
}

/// Full page. `notice` is shown above the results, e.g. after a failed run.
pub fn page(keyword: &str, result: Option<&ResearchResult>, notice: Option<&str>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        concat!(
            r#"<!doctype html><html lang="ko"><head><meta charset="utf-8">"#,
            "<title>뉴스 리서치</title><style>{}</style></head>",
            "<body><h1>뉴스 리서치</h1>",
        ),
        STYLE
    );
    form(&mut out, keyword);
    if let Some(notice) = notice {
        let _ = write!(out, r#"<p class="notice">{}</p>"#, escape(notice));
    }
    if let Some(result) = result {
        results(&mut out, result);
    }
    out.push_str("</body></html>");
    out
}

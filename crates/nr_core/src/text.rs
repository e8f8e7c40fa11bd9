use url::Url;

pub const DEFAULT_SUMMARY_CHARS: usize = 220;
const ELLIPSIS: &str = "...";

/// Characters that end a sentence when followed by whitespace. `다` is the
/// Korean declarative ending.
const SENTENCE_ENDINGS: [char; 5] = ['.', '!', '?', '다', '。'];

/// Returns the lead sentence of `text`, cut to `max_chars` characters with a
/// trailing `...` when it had to be shortened.
pub fn summarize(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let first = first_sentence(text).trim();
    if first.chars().count() > max_chars {
        let mut cut: String = first.chars().take(max_chars).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        first.to_string()
    }
}

fn first_sentence(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if !SENTENCE_ENDINGS.contains(&c) {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if next.is_whitespace() {
                return &text[..idx + c.len_utf8()];
            }
        }
    }
    text
}

/// Trims every fragment, drops empty ones and collapses internal whitespace.
pub fn clean_text<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fragments
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Host (and explicit port) of `url`, lowercased. Empty when the url does
/// not parse or has no host.
pub fn domain_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default().to_lowercase();
            match parsed.port() {
                Some(port) if !host.is_empty() => format!("{}:{}", host, port),
                _ => host,
            }
        }
        Err(_) => String::new(),
    }
}

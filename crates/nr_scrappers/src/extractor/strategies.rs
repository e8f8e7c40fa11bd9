//! Body-text strategies, tried in priority order until one yields text.

use lazy_static::lazy_static;
use nr_core::text::clean_text;
use scraper::{ElementRef, Html, Selector};

/// Container selectors in priority order. `#dic_area` is Naver News; the
/// rest cover the common Korean press CMS layouts, ending with `<article>`.
pub const CONTAINER_SELECTORS: [&str; 9] = [
    "#dic_area",
    "#article-view-content-div",
    ".article-body",
    "#articleBody",
    "#articeBody",
    ".article_body",
    ".news_end",
    "#newsEndContents",
    "article",
];

const HIDDEN_TAGS: [&str; 3] = ["script", "style", "noscript"];

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").unwrap();
}

pub trait ContentStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the body text, or `None` when this strategy found nothing.
    fn extract(&self, document: &Html) -> Option<String>;
}

/// Visible text of an element with whitespace cleaned up; script and style
/// contents are skipped.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let fragments = element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|el| HIDDEN_TAGS.contains(&el.name()))
            .unwrap_or(false);
        if hidden {
            None
        } else {
            Some(&**text)
        }
    });
    clean_text(fragments)
}

/// Cleaned text of every paragraph under `element`, one per line.
fn paragraphs(element: ElementRef<'_>) -> Option<String> {
    let lines: Vec<String> = element
        .select(&PARAGRAPH)
        .map(visible_text)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First element matching a CSS selector. Its paragraphs if it has any,
/// otherwise its whole visible text.
pub struct ContainerStrategy {
    raw: &'static str,
    selector: Selector,
}

impl ContainerStrategy {
    pub fn new(raw: &'static str) -> Option<Self> {
        Selector::parse(raw).ok().map(|selector| Self { raw, selector })
    }
}

impl ContentStrategy for ContainerStrategy {
    fn name(&self) -> &str {
        self.raw
    }

    fn extract(&self, document: &Html) -> Option<String> {
        let container = document.select(&self.selector).next()?;
        if container.select(&PARAGRAPH).next().is_some() {
            paragraphs(container)
        } else {
            non_empty(visible_text(container))
        }
    }
}

/// Last resort: every paragraph on the page.
pub struct PageParagraphs;

impl ContentStrategy for PageParagraphs {
    fn name(&self) -> &str {
        "page paragraphs"
    }

    fn extract(&self, document: &Html) -> Option<String> {
        paragraphs(document.root_element())
    }
}

pub fn default_strategies() -> Vec<Box<dyn ContentStrategy>> {
    let mut strategies: Vec<Box<dyn ContentStrategy>> = CONTAINER_SELECTORS
        .iter()
        .copied()
        .filter_map(ContainerStrategy::new)
        .map(|s| Box::new(s) as Box<dyn ContentStrategy>)
        .collect();
    strategies.push(Box::new(PageParagraphs));
    strategies
}

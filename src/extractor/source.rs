use scraper::{Html, Selector, node::Element};
use std::sync::LazyLock;

use crate::extractor::{model::collapse_whitespace, text::block_text};

/// Tried in order; the first selector matching anything wins.
const CONTENT_SELECTORS: [&str; 4] = ["article", "main", ".post-content", ".entry-content"];

const NON_CONTENT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

static CONTENT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|selector| Selector::parse(selector).ok())
        .collect()
});

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Best-effort readable text of an arbitrary article page, on one line.
pub fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let root = CONTENT
        .iter()
        .find_map(|selector| document.select(selector).next())
        .or_else(|| document.select(&BODY).next());

    match root {
        Some(element) => collapse_whitespace(&block_text(element, is_non_content)),
        None => String::new(),
    }
}

fn is_non_content(element: &Element) -> bool {
    NON_CONTENT_ELEMENTS.contains(&element.name())
}

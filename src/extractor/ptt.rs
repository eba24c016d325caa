//! Text extraction for PTT article pages.
//!
//! The article body lives in `#main-content`, interleaved with metadata
//! lines (author/board/title/time) and reader pushes. Everything after the
//! `--` signature line is the signature block and site footer.

use regex::Regex;
use scraper::{ElementRef, Html, Selector, node::Element};
use std::sync::LazyLock;
use thiserror::Error;

use crate::extractor::text::block_text;

static MAIN_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#main-content").unwrap());

static METALINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".article-metaline").unwrap());

static META_TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".article-meta-tag").unwrap());

static META_VALUE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".article-meta-value").unwrap());

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(作者|標題|時間)").unwrap());

static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[\s&&[^\n]]*標題[\s:：&&[^\n]]+(.*?)[\s&&[^\n]]*$").unwrap());

/// Classes of nodes that never belong to the article body.
const NOISE_CLASSES: [&str; 3] = ["article-metaline", "article-metaline-right", "push"];

const SIGNATURE_SEPARATOR: &str = "--";

const TITLE_LABEL: &str = "標題";

/// The readable parts of a PTT article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText {
    /// Body with metadata, pushes, header lines and signature removed.
    pub body: String,
    /// Title from the metadata block, or from a `標題` line of the article.
    pub title: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Main content not found in PTT article.")]
    ContentNotFound,
}

/// Extract the body and title of a PTT article page.
pub fn extract_post(html: &str) -> Result<PostText, ExtractError> {
    let document = Html::parse_document(html);
    let main_content = document
        .select(&MAIN_CONTENT)
        .next()
        .ok_or(ExtractError::ContentNotFound)?;

    let full_text = block_text(main_content, is_noise);
    let article = truncate_at_signature(&full_text);
    // Header lines are gone from the body, so the title is read first.
    let title = metaline_title(main_content).or_else(|| find_title_line(article));

    Ok(PostText {
        body: strip_header_lines(article).trim().to_string(),
        title,
    })
}

/// Extract the cleaned body text of a PTT article page.
pub fn extract_post_text(html: &str) -> Result<String, ExtractError> {
    extract_post(html).map(|post| post.body)
}

/// Title taken from the first `標題` line of `text`, if it carries one.
pub fn find_title_line(text: &str) -> Option<String> {
    TITLE_LINE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .find(|title| !title.is_empty())
}

fn metaline_title(main_content: ElementRef<'_>) -> Option<String> {
    main_content.select(&METALINE).find_map(|line| {
        let tag: String = line.select(&META_TAG).next()?.text().collect();
        if tag.trim() != TITLE_LABEL {
            return None;
        }
        let value: String = line.select(&META_VALUE).next()?.text().collect();
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn is_noise(element: &Element) -> bool {
    element
        .classes()
        .any(|class| NOISE_CLASSES.contains(&class))
}

fn truncate_at_signature(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim() == SIGNATURE_SEPARATOR {
            return &text[..offset];
        }
        offset += line.len();
    }
    text
}

fn strip_header_lines(text: &str) -> &str {
    let mut rest = text.trim_start();
    while HEADER_LINE.is_match(rest) {
        rest = match rest.find('\n') {
            Some(end) => rest[end + 1..].trim_start(),
            None => "",
        };
    }
    rest
}

use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// The first absolute http(s) URL in `text`. Anything after it is ignored.
pub fn find_first_url(text: &str) -> Option<&str> {
    URL_REGEX.find(text).map(|m| m.as_str())
}

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::analysis::AnalysisResult;

pub const PTT_ARTICLE_MARKER: &str = "ptt.cc/bbs/";

static ARTICLE_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ptt\.cc/bbs/[^/\s]+/(M\.\d+\.A\.[0-9A-Za-z]+)\.html")
        .expect("Failed to compile article id regex")
});

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    pub article_id: String,
    pub analysis: AnalysisResult,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() || !self.url.contains(PTT_ARTICLE_MARKER) {
            return Err("A valid PTT URL is required.".to_string());
        }
        Ok(())
    }

    /// The `M.<timestamp>.A.<hash>` token naming the post.
    pub fn article_id(&self) -> Result<&str, String> {
        ARTICLE_ID_REGEX
            .captures(&self.url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| "Could not parse an article ID from the PTT URL.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_valid_url() {
        let request = request("https://www.ptt.cc/bbs/Gossiping/M.1700000000.A.ABC123.html");
        assert!(request.validate().is_ok());
        assert_eq!(request.article_id(), Ok("M.1700000000.A.ABC123"));
    }

    #[test]
    fn test_non_ptt_url() {
        let request = request("https://example.com/bbs/Gossiping/M.1700000000.A.ABC123.html");
        assert_eq!(
            request.validate(),
            Err("A valid PTT URL is required.".to_string())
        );
        assert!(self::request("").validate().is_err());
    }

    #[test]
    fn test_board_index_has_no_article_id() {
        let request = request("https://www.ptt.cc/bbs/Gossiping/index.html");
        assert!(request.validate().is_ok());
        assert!(request.article_id().is_err());
    }

    #[test]
    fn test_missing_url_field_defaults_to_empty() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }
}

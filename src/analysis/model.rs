use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

pub const UNTITLED_ANALYSIS: &str = "Untitled Analysis";

/// Kinds of translation problems a provider may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ErrorType {
    #[serde(rename = "Semantic Error")]
    SemanticError,
    #[serde(rename = "Omission")]
    Omission,
    #[serde(rename = "Addition")]
    Addition,
    #[serde(rename = "Tone Mismatch")]
    ToneMismatch,
    #[serde(rename = "Mistranslated Term")]
    MistranslatedTerm,
}

impl ErrorType {
    pub const ALL: [ErrorType; 5] = [
        ErrorType::SemanticError,
        ErrorType::Omission,
        ErrorType::Addition,
        ErrorType::ToneMismatch,
        ErrorType::MistranslatedTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::SemanticError => "Semantic Error",
            ErrorType::Omission => "Omission",
            ErrorType::Addition => "Addition",
            ErrorType::ToneMismatch => "Tone Mismatch",
            ErrorType::MistranslatedTerm => "Mistranslated Term",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEntry {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub problematic_translation: String,
    pub original_sentence: String,
    pub suggested_correction: String,
    pub explanation: String,
}

/// The normalized critique every provider must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub article_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarized_title: Option<String>,
    pub full_post_text: String,
    pub analysis_summary: String,
    pub errors_found: Vec<ErrorEntry>,
}

impl AnalysisResult {
    /// Parse and validate the raw JSON string returned by a provider.
    pub fn from_provider_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Fill a blank `article_title` from the scraped post title, or a placeholder.
    pub fn ensure_title(&mut self, scraped_title: Option<&str>) {
        if !self.article_title.trim().is_empty() {
            return;
        }
        self.article_title = scraped_title.unwrap_or(UNTITLED_ANALYSIS).to_string();
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

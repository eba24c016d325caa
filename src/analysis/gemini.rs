use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use tracing::{instrument, warn};
use url::{Position, Url};

use crate::{
    analysis::{AnalysisError, AnalysisService, LLM_CLIENT, LLM_TIMEOUT, prompt},
    config::{ConfigError, ProviderConfig, REDACTED},
};

const PROVIDER: &str = "Gemini";

/// Google Gemini `generateContent`, with the result shape enforced by a
/// response schema.
#[derive(Clone)]
pub struct GeminiProvider {
    endpoint: Url,
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The query string carries the API key.
        f.debug_struct("GeminiProvider")
            .field("endpoint", &&self.endpoint[..Position::AfterPath])
            .field("api_key", &REDACTED)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let mut endpoint = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        ))
        .map_err(|e| ConfigError::InvalidValue {
            field: "api_base",
            reason: e.to_string(),
        })?;
        endpoint
            .query_pairs_mut()
            .append_pair("key", &config.api_key);
        Ok(Self { endpoint })
    }

    fn build_payload(&self, forum_post_text: &str, original_source_text: &str) -> GenerateContentRequest {
        let text = format!(
            "{}\n\n{}",
            prompt::EDITOR_PERSONA,
            prompt::instructions(forum_post_text, original_source_text)
        );
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(text) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        }
    }
}

/// OpenAPI-style schema mirroring `AnalysisResult`.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "article_title": { "type": "STRING" },
            "summarized_title": { "type": "STRING" },
            "full_post_text": { "type": "STRING" },
            "analysis_summary": { "type": "STRING" },
            "errors_found": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": {
                            "type": "STRING",
                            "enum": ["Semantic Error", "Omission", "Addition", "Tone Mismatch", "Mistranslated Term"]
                        },
                        "problematic_translation": { "type": "STRING" },
                        "original_sentence": { "type": "STRING" },
                        "suggested_correction": { "type": "STRING" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["type", "problematic_translation", "original_sentence", "suggested_correction", "explanation"]
                }
            }
        },
        "required": ["article_title", "summarized_title", "full_post_text", "analysis_summary", "errors_found"]
    })
}

fn parse_response(body: &str) -> Result<String, AnalysisError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::malformed(PROVIDER, format!("invalid envelope: {e}")))?;

    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            warn!(body = %body, "Unexpected Gemini API response structure");
            AnalysisError::malformed(PROVIDER, "missing candidates[0].content.parts[0].text")
        })
}

#[async_trait]
impl AnalysisService for GeminiProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    #[instrument(skip_all, fields(provider = PROVIDER))]
    async fn perform_analysis(
        &self,
        forum_post_text: &str,
        original_source_text: &str,
    ) -> Result<String, AnalysisError> {
        let payload = self.build_payload(forum_post_text, original_source_text);

        let response = LLM_CLIENT
            .post(self.endpoint.clone())
            .timeout(LLM_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AnalysisError::from_reqwest_error(PROVIDER, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::from_reqwest_error(PROVIDER, e))?;

        if !status.is_success() {
            warn!(%status, body = %body, "Gemini API error");
            return Err(AnalysisError::provider(
                PROVIDER,
                format!("status {status}: {body}"),
            ));
        }

        parse_response(&body)
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{instrument, warn};
use url::Url;

use crate::{
    analysis::{AnalysisError, AnalysisService, LLM_CLIENT, LLM_TIMEOUT, prompt},
    config::{ConfigError, ProviderConfig, REDACTED},
};

const PROVIDER: &str = "OpenAI";

/// OpenAI chat completions in JSON mode. The result shape is only requested
/// through the prompt.
#[derive(Clone)]
pub struct OpenAiProvider {
    endpoint: Url,
    api_key: String,
    model: String,
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &REDACTED)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&format!(
            "{}/v1/chat/completions",
            config.api_base.trim_end_matches('/')
        ))
        .map_err(|e| ConfigError::InvalidValue {
            field: "api_base",
            reason: e.to_string(),
        })?;
        Ok(Self {
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn build_payload(
        &self,
        forum_post_text: &str,
        original_source_text: &str,
    ) -> ChatCompletionRequest<'_> {
        let user_prompt = format!(
            "{}\n\n{}",
            prompt::instructions(forum_post_text, original_source_text),
            prompt::JSON_SHAPE
        );
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::EDITOR_PERSONA.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

fn parse_response(body: &str) -> Result<String, AnalysisError> {
    let envelope: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::malformed(PROVIDER, format!("invalid envelope: {e}")))?;

    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| {
            warn!(body = %body, "Unexpected OpenAI API response structure");
            AnalysisError::malformed(PROVIDER, "missing choices[0].message.content")
        })
}

#[async_trait]
impl AnalysisService for OpenAiProvider {
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
            .bearer_auth(&self.api_key)
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
            warn!(%status, body = %body, "OpenAI API error");
            return Err(AnalysisError::provider(
                PROVIDER,
                format!("status {status}: {body}"),
            ));
        }

        parse_response(&body)
    }
}

//! Interchangeable LLM backends behind one contract.
//!
//! A provider receives the forum post and the ground-truth source text and
//! returns the raw JSON string of an `AnalysisResult`. Parsing and
//! validating that string is left to the caller.

pub mod errors;
pub mod gemini;
pub mod model;
pub mod openai;
pub mod prompt;

pub use errors::AnalysisError;
pub use gemini::GeminiProvider;
pub use model::{AnalysisResult, ErrorEntry, ErrorType, UNTITLED_ANALYSIS};
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::{sync::Arc, time::Duration};

use crate::config::{ConfigError, ProviderConfig, ProviderKind};

pub const LLM_TIMEOUT: Duration = Duration::from_secs(30);

static LLM_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(LLM_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Human-readable provider name used in logs and error messages.
    fn provider_name(&self) -> &'static str;

    /// Compare the post against the source and return the provider's raw JSON.
    async fn perform_analysis(
        &self,
        forum_post_text: &str,
        original_source_text: &str,
    ) -> Result<String, AnalysisError>;
}

/// Construct the provider selected in configuration.
pub fn build_service(config: &ProviderConfig) -> Result<Arc<dyn AnalysisService>, ConfigError> {
    let service: Arc<dyn AnalysisService> = match config.kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config)?),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config)?),
    };
    Ok(service)
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Transport failure or a non-success status from the provider.
    #[error("{provider} API request failed: {detail}")]
    Provider {
        provider: &'static str,
        detail: String,
    },

    /// The provider answered, but not with what we asked for.
    #[error("Received an unexpected response format from the {provider} API: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },
}

impl AnalysisError {
    pub fn provider(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            detail: detail.into(),
        }
    }

    pub fn malformed(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            detail: detail.into(),
        }
    }

    pub fn from_reqwest_error(provider: &'static str, err: reqwest::Error) -> Self {
        // The Gemini endpoint carries the API key in its query string
        let err = err.without_url();
        if err.is_timeout() {
            Self::provider(provider, "request timed out")
        } else {
            Self::provider(provider, err.to_string())
        }
    }
}

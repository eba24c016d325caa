use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::{analysis::AnalysisError, extractor::ExtractError, fetcher::FetchError};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Failures surfaced to API callers, each mapped to one status code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Could not scrape the PTT article content: {0}")]
    UpstreamFetch(#[from] FetchError),

    #[error("{0}")]
    UpstreamParse(#[from] ExtractError),

    #[error("{0}")]
    AiProvider(AnalysisError),

    #[error("{0}")]
    MalformedProviderResponse(String),

    #[error("An unknown server error occurred: {0}")]
    Internal(String),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Provider { .. } => Self::AiProvider(err),
            AnalysisError::MalformedResponse { .. } => {
                Self::MalformedProviderResponse(err.to_string())
            }
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamFetch(_)
            | AppError::UpstreamParse(_)
            | AppError::AiProvider(_)
            | AppError::MalformedProviderResponse(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Analyze request failed");
        }
        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(FetchError::Timeout).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(AnalysisError::provider("Gemini", "boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::from(ExtractError::ContentNotFound).to_string(),
            "Main content not found in PTT article."
        );
        assert_eq!(
            AppError::from(FetchError::Timeout).to_string(),
            "Could not scrape the PTT article content: timed out waiting for the page"
        );
        assert_eq!(
            AppError::from(AnalysisError::provider("OpenAI", "status 401")).to_string(),
            "OpenAI API request failed: status 401"
        );
        assert!(matches!(
            AppError::from(AnalysisError::malformed("Gemini", "x")),
            AppError::MalformedProviderResponse(_)
        ));
    }
}

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{info, instrument, warn};

use crate::{
    analysis::AnalysisResult,
    analyze::dtos::{AnalyzeRequest, AnalyzeResponse},
    app_state::AppState,
    error::{AppError, ErrorResponse},
    extractor::{extract_post, find_first_url},
    fetcher::{fetch_source_text, fetch_with_cookie},
};

/// PTT hides some boards behind an age gate; this cookie passes it.
pub const PTT_AGE_COOKIE: &str = "over18=1";

#[utoipa::path(
    post,
    path = "/api/analyze/",
    tag = "analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Translation analysis", body = AnalyzeResponse),
        (status = 400, description = "Missing or invalid PTT URL", body = ErrorResponse),
        (status = 500, description = "Scraping or provider failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn analyze_url(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    request.validate().map_err(AppError::InvalidRequest)?;
    let article_id = request
        .article_id()
        .map_err(AppError::InvalidRequest)?
        .to_string();
    info!(%article_id, url = %request.url, "Analyzing PTT article");

    let page = fetch_with_cookie(&request.url, PTT_AGE_COOKIE).await?;
    let post = extract_post(&page.body_utf8)?;
    let post_text = post.body;

    let source_text = match find_first_url(&post_text) {
        Some(source_url) => {
            info!(%source_url, "Source URL found, attempting to scrape");
            fetch_source_text(source_url).await
        }
        None => {
            info!("No source URL found in the post");
            None
        }
    };
    if source_text.is_none() {
        warn!(%article_id, "Comparing the post against itself");
    }
    let ground_truth = source_text.as_deref().unwrap_or(&post_text);

    let raw = state
        .analysis
        .perform_analysis(&post_text, ground_truth)
        .await?;

    let mut analysis = AnalysisResult::from_provider_json(&raw).map_err(|e| {
        AppError::MalformedProviderResponse(format!(
            "The {} API returned an invalid analysis: {}",
            state.analysis.provider_name(),
            e
        ))
    })?;
    analysis.ensure_title(post.title.as_deref());

    Ok(Json(AnalyzeResponse {
        article_id,
        analysis,
    }))
}

use std::any::Any;

use axum::{
    Json, Router,
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};
use utoipa::OpenApi;

use crate::{
    analysis::{AnalysisResult, ErrorEntry, ErrorType},
    analyze::{self, AnalyzeRequest, AnalyzeResponse},
    app_state::AppState,
    error::{AppError, ErrorResponse},
    health::{self, HealthResponse, RootResponse},
};

#[derive(OpenApi)]
#[openapi(
    paths(analyze::handlers::analyze_url, health::root, health::health_check),
    components(schemas(
        AnalyzeRequest,
        AnalyzeResponse,
        AnalysisResult,
        ErrorEntry,
        ErrorType,
        ErrorResponse,
        RootResponse,
        HealthResponse
    )),
    tags(
        (name = "analyze", description = "Translation quality analysis of PTT posts"),
        (name = "health", description = "Liveness endpoints")
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router with CORS, tracing, request ids and
/// panic recovery applied.
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(health::root))
        .route("/healthz", get(health::health_check))
        .route("/api/analyze", post(analyze::analyze_url))
        .route("/api/analyze/", post(analyze::analyze_url))
        .route("/api-docs/openapi.json", get(openapi))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(cors),
        )
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!(%message, "Request handler panicked");

    AppError::Internal(message).into_response()
}

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app_state::AppState;

pub const ROOT_MESSAGE: &str = "PTT Proofreading Backend";

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service banner", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Health check successful", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        provider: state.analysis.provider_name().to_string(),
    })
}

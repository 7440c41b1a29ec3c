//! Health and OpenAPI handlers.

use crate::api::{ApiDoc, AppState};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use utoipa::OpenApi;

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check(State(_state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3.x specification document")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

//! System handlers: health, OpenAPI, cache maintenance.

use crate::api::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3.1 specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}

/// GET /cache - Cache statistics
#[utoipa::path(
    get,
    path = "/cache",
    tag = "cache",
    responses(
        (status = 200, description = "Number of cached documents and their keys", body = crate::types::CacheStats)
    )
)]
pub async fn cache_stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.client.cache_stats().await;
    (StatusCode::OK, Json(stats))
}

/// DELETE /cache - Clear the cache
#[utoipa::path(
    delete,
    path = "/cache",
    tag = "cache",
    responses(
        (status = 204, description = "Cache cleared")
    )
)]
pub async fn clear_cache(State(state): State<AppState>) -> impl IntoResponse {
    state.client.clear_cache().await;
    tracing::info!("Content cache cleared via API");
    StatusCode::NO_CONTENT
}

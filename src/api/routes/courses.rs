//! Course content handlers.

use super::LanguageQuery;
use crate::api::AppState;
use crate::meta::generate_meta_tags;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET / - Document for the configured default course
#[utoipa::path(
    get,
    path = "/",
    tag = "courses",
    params(LanguageQuery),
    responses(
        (status = 200, description = "Resolved course document (remote or fallback)", body = crate::types::ContentDocument),
        (status = 400, description = "Unsupported language", body = crate::error::ApiError)
    )
)]
pub async fn get_default_course(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Response {
    let language = match query.resolve(state.config.content.default_language) {
        Ok(language) => language,
        Err(response) => return response,
    };

    let document = state
        .client
        .resolve_content(&state.config.content.default_slug, language)
        .await;
    (StatusCode::OK, Json(&*document)).into_response()
}

/// GET /courses/:slug - Document for one course
#[utoipa::path(
    get,
    path = "/courses/{slug}",
    tag = "courses",
    params(
        ("slug" = String, Path, description = "Course slug"),
        LanguageQuery
    ),
    responses(
        (status = 200, description = "Resolved course document (remote or fallback)", body = crate::types::ContentDocument),
        (status = 400, description = "Unsupported language", body = crate::error::ApiError)
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Response {
    let language = match query.resolve(state.config.content.default_language) {
        Ok(language) => language,
        Err(response) => return response,
    };

    let document = state.client.resolve_content(&slug, language).await;
    (StatusCode::OK, Json(&*document)).into_response()
}

/// GET /courses/:slug/meta - Page meta tags for one course
#[utoipa::path(
    get,
    path = "/courses/{slug}/meta",
    tag = "courses",
    params(
        ("slug" = String, Path, description = "Course slug"),
        LanguageQuery
    ),
    responses(
        (status = 200, description = "Meta tags derived from the document's SEO block", body = crate::meta::MetaTags),
        (status = 400, description = "Unsupported language", body = crate::error::ApiError)
    )
)]
pub async fn get_course_meta(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Response {
    let language = match query.resolve(state.config.content.default_language) {
        Ok(language) => language,
        Err(response) => return response,
    };

    let document = state.client.resolve_content(&slug, language).await;
    (StatusCode::OK, Json(generate_meta_tags(&document))).into_response()
}

/// GET /courses - Course listing
#[utoipa::path(
    get,
    path = "/courses",
    tag = "courses",
    params(LanguageQuery),
    responses(
        (status = 200, description = "Courses reported by the catalog", body = Vec<crate::types::ContentDocument>),
        (status = 400, description = "Unsupported language", body = crate::error::ApiError),
        (status = 502, description = "Catalog unreachable", body = crate::error::ApiError),
        (status = 504, description = "Catalog timed out", body = crate::error::ApiError)
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Response {
    let language = match query.resolve(state.config.content.default_language) {
        Ok(language) => language,
        Err(response) => return response,
    };

    match state.client.fetch_courses(language).await {
        Ok(courses) => (StatusCode::OK, Json(courses)).into_response(),
        Err(e) => {
            tracing::warn!(language = %language, error = %e, "Course listing failed");
            e.into_response()
        }
    }
}

//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the course content
//! REST API using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the course content REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "course-content REST API",
        version = "0.1.0",
        description = "Resolved course landing-page content with cached catalog lookups and a static fallback",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Content
        crate::api::routes::get_default_course,
        crate::api::routes::list_courses,
        crate::api::routes::get_course,
        crate::api::routes::get_course_meta,

        // Cache
        crate::api::routes::cache_stats,
        crate::api::routes::clear_cache,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::Language,
        crate::types::ContentDocument,
        crate::types::MediaItem,
        crate::types::ChecklistItem,
        crate::types::SeoMetadata,
        crate::types::CtaText,
        crate::types::Section,
        crate::types::SectionItem,
        crate::types::CacheStats,

        crate::meta::MetaTags,
        crate::meta::OpenGraph,
        crate::meta::TwitterCard,

        crate::config::Config,
        crate::config::ContentConfig,
        crate::config::ServerIntegrationConfig,
        crate::config::ApiConfig,

        crate::api::routes::LanguageQuery,

        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "courses", description = "Course content - Resolved documents, listings and page meta tags"),
        (name = "cache", description = "Content cache - Inspect and clear cached documents"),
        (name = "system", description = "System endpoints - Health checks and OpenAPI spec"),
    )
)]
pub struct ApiDoc;

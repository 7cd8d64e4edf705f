//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`courses`] - Course documents, listings and meta tags
//! - [`system`] - Health, OpenAPI, cache maintenance

use crate::error::ApiError;
use crate::types::Language;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

mod courses;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use courses::*;
pub use system::*;

// ============================================================================
// Query/Request Types (shared across handlers)
// ============================================================================

/// Query parameters selecting the content language
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LanguageQuery {
    /// Content language: "en" or "bn" (default: configured language)
    pub lang: Option<String>,
}

impl LanguageQuery {
    /// Resolve the requested language, falling back to `default` when absent
    ///
    /// An unsupported value is rejected with a 400 response.
    pub(crate) fn resolve(&self, default: Language) -> Result<Language, Response> {
        match self.lang.as_deref() {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse().map_err(|e: crate::types::ParseLanguageError| {
                let mut error = ApiError::validation(e.to_string());
                error.error.details = Some(serde_json::json!({
                    "supported": Language::SUPPORTED
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                }));
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }),
        }
    }
}

//! Error types for course-content
//!
//! This module provides error handling for the library, including:
//! - The crate-level [`Error`] type used by configuration, startup and the API server
//! - [`CatalogError`], the typed failures of the bulk-listing path
//! - [`ValidationError`], produced when a payload does not have the document shape
//! - HTTP status code mapping and structured error bodies for the REST API

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for course-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for course-content
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Catalog request failed (bulk listing only; document resolution never errors)
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// HTTP client error outside of a catalog request (e.g. client construction)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Typed failures of the bulk course listing.
///
/// Each variant carries an HTTP-like status: `0` when the catalog could not be
/// reached at all, `408` when the request timed out, and the upstream status
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No connectivity (DNS failure, connection refused, reset, ...)
    #[error("Network error - please check your connection")]
    Network,

    /// The request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The catalog answered, but not with a usable listing
    #[error("{message}")]
    Remote {
        /// Upstream HTTP status (500 when the body could not be parsed)
        status: u16,
        /// Human-readable message
        message: String,
        /// Optional upstream error code
        code: Option<String>,
    },
}

impl CatalogError {
    /// HTTP-like status carried by this failure
    pub fn status(&self) -> u16 {
        match self {
            CatalogError::Network => 0,
            CatalogError::Timeout => 408,
            CatalogError::Remote { status, .. } => *status,
        }
    }

    /// Create a remote failure without an upstream error code
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        CatalogError::Remote {
            status,
            message: message.into(),
            code: None,
        }
    }
}

/// Reasons a JSON payload is rejected as a content document.
///
/// Validation is shallow: only the presence and type of the top-level fields
/// is checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The candidate is not a JSON object
    #[error("document must be a JSON object")]
    NotAnObject,

    /// A required field is absent or null
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A required field is present with the wrong JSON type
    #[error("field `{field}` must be {expected}")]
    WrongType {
        /// Name of the offending field
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },

    /// The shape checks passed but the document could not be decoded
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "catalog_timeout",
///     "message": "catalog error: Request timeout",
///     "details": {
///       "status": 408
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "catalog_timeout", "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            Error::Config { .. } => 400,

            // The catalog is an upstream service: unreachable is a bad gateway,
            // a timeout is a gateway timeout, and upstream errors pass through
            // when they are real HTTP error statuses.
            Error::Catalog(CatalogError::Network) => 502,
            Error::Catalog(CatalogError::Timeout) => 504,
            Error::Catalog(CatalogError::Remote { status, .. }) => {
                if (400..=599).contains(status) {
                    *status
                } else {
                    502
                }
            }
            Error::Network(_) => 502,

            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Catalog(e) => match e {
                CatalogError::Network => "catalog_unreachable",
                CatalogError::Timeout => "catalog_timeout",
                CatalogError::Remote { .. } => "catalog_error",
            },
            Error::Network(_) => "network_error",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::Catalog(CatalogError::Remote { status, code, .. }) => Some(serde_json::json!({
                "status": status,
                "upstream_code": code,
            })),
            Error::Catalog(e) => Some(serde_json::json!({
                "status": e.status(),
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}

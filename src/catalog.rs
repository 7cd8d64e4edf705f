//! Catalog client: resolves course documents through the cache, the remote
//! catalog and the built-in fallback.
//!
//! Two operations are offered:
//!
//! - [`CatalogClient::resolve_content`] never fails. Any problem while talking
//!   to the catalog is logged and answered with the fallback document, which is
//!   never cached.
//! - [`CatalogClient::fetch_courses`] lists courses and returns a typed
//!   [`CatalogError`], since there is no fallback listing.
//!
//! Each call makes exactly one request; nothing is retried.

use crate::cache::{ContentCache, cache_key};
use crate::config::ContentConfig;
use crate::error::{CatalogError, Error, Result, ValidationError};
use crate::fallback::fallback_document;
use crate::types::{CacheStats, ContentDocument, Language};
use crate::validator::{ShapeMismatch, locate_document, parse_document};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Header naming the platform the request originates from
pub const SOURCE_PLATFORM_HEADER: &str = "X-TENMS-SOURCE-PLATFORM";

/// Why a live document could not be used. Only ever logged.
#[derive(Debug)]
enum ResolveFailure {
    Timeout,
    Network(reqwest::Error),
    UpstreamStatus(u16),
    UnparsableBody(String),
    MalformedShape(ShapeMismatch),
    Invalid(ValidationError),
}

impl ResolveFailure {
    fn kind(&self) -> &'static str {
        match self {
            ResolveFailure::Timeout => "timeout",
            ResolveFailure::Network(_) => "network_failure",
            ResolveFailure::UpstreamStatus(_) => "upstream_non_success",
            ResolveFailure::UnparsableBody(_) => "unparsable_body",
            ResolveFailure::MalformedShape(_) | ResolveFailure::Invalid(_) => "malformed_shape",
        }
    }
}

impl std::fmt::Display for ResolveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveFailure::Timeout => f.write_str("request timeout"),
            ResolveFailure::Network(e) => write!(f, "request failed: {}", e),
            ResolveFailure::UpstreamStatus(status) => {
                write!(f, "API request failed with status {}", status)
            }
            ResolveFailure::UnparsableBody(e) => write!(f, "response is not valid JSON: {}", e),
            ResolveFailure::MalformedShape(mismatch) => write!(f, "{}", mismatch),
            ResolveFailure::Invalid(e) => write!(f, "invalid course data structure: {}", e),
        }
    }
}

/// Client for the remote product catalog
pub struct CatalogClient {
    /// HTTP client carrying the fixed catalog headers
    http_client: reqwest::Client,

    /// Catalog endpoint, validated at construction
    base_url: Url,

    /// Overall per-request timeout
    timeout: Duration,

    /// Shared document cache
    cache: Arc<ContentCache>,
}

impl CatalogClient {
    /// Create a client with its own cache sized from `config`
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be created
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let cache = Arc::new(ContentCache::new(config.cache_duration));
        Self::with_cache(config, cache)
    }

    /// Create a client that uses an existing cache
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be created
    pub fn with_cache(config: &ContentConfig, cache: Arc<ContentCache>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid catalog base URL: {}", e),
            key: Some("base_url".to_string()),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("catalog base URL cannot have paths: {}", base_url),
                key: Some("base_url".to_string()),
            });
        }

        let platform = HeaderValue::from_str(&config.source_platform).map_err(|e| {
            Error::Config {
                message: format!("invalid source platform header value: {}", e),
                key: Some("source_platform".to_string()),
            }
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-tenms-source-platform"), platform);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            timeout: config.request_timeout,
            cache,
        })
    }

    /// The cache this client reads and fills
    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// Resolve the document for `slug` in `language`.
    ///
    /// Served from cache while fresh; otherwise fetched, validated and cached.
    /// On any failure the fallback document is returned and nothing is cached.
    pub async fn resolve_content(&self, slug: &str, language: Language) -> Arc<ContentDocument> {
        let key = cache_key(slug, language);

        if let Some(document) = self.cache.get(&key).await {
            debug!(key = %key, "Serving course data from cache");
            return document;
        }
        debug!(key = %key, "Cache miss, fetching course data");

        match self.fetch_document(slug, language).await {
            Ok(document) => {
                let document = Arc::new(document);
                self.cache.put(key, Arc::clone(&document)).await;
                document
            }
            Err(failure) => {
                warn!(
                    slug,
                    language = %language,
                    kind = failure.kind(),
                    error = %failure,
                    "Course data unavailable, using fallback data"
                );
                fallback_document()
            }
        }
    }

    /// List courses in `language`.
    ///
    /// Entries that do not have the document shape are skipped.
    ///
    /// # Errors
    /// - [`CatalogError::Network`] if the catalog cannot be reached
    /// - [`CatalogError::Timeout`] if the request exceeds the timeout
    /// - [`CatalogError::Remote`] for error statuses, unparsable bodies and
    ///   bodies without `success: true`
    pub async fn fetch_courses(
        &self,
        language: Language,
    ) -> std::result::Result<Vec<ContentDocument>, CatalogError> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("lang", language.as_str());

        let (status, body) = self.get(url).await.map_err(|e| match e {
            ResolveFailure::Timeout => CatalogError::Timeout,
            ResolveFailure::Network(e) if e.is_timeout() => CatalogError::Timeout,
            ResolveFailure::Network(e) if e.is_connect() || e.is_request() => {
                CatalogError::Network
            }
            other => CatalogError::remote(500, other.to_string()),
        })?;

        if !(200..300).contains(&status) {
            return Err(CatalogError::remote(
                status,
                format!("HTTP error! status: {}", status),
            ));
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| CatalogError::remote(500, format!("Unexpected response body: {}", e)))?;

        if payload.get("success").and_then(Value::as_bool) != Some(true) {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("API request failed")
                .to_string();
            let code = payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Err(CatalogError::Remote {
                status,
                message,
                code,
            });
        }

        let items = match payload.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        let total = items.len();
        let courses: Vec<ContentDocument> = items
            .into_iter()
            .filter_map(|item| match parse_document(item) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!(language = %language, error = %e, "Skipping malformed course entry");
                    None
                }
            })
            .collect();

        debug!(
            language = %language,
            total,
            accepted = courses.len(),
            "Fetched course listing"
        );
        Ok(courses)
    }

    /// Drop every cached document
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Cache entry count and keys
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// `{base_url}/{slug}?lang={language}`, with the slug percent-encoded as one path segment
    fn document_url(&self, slug: &str, language: Language) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(slug);
        }
        url.query_pairs_mut().append_pair("lang", language.as_str());
        url
    }

    async fn fetch_document(
        &self,
        slug: &str,
        language: Language,
    ) -> std::result::Result<ContentDocument, ResolveFailure> {
        let (status, body) = self.get(self.document_url(slug, language)).await?;

        if !(200..300).contains(&status) {
            return Err(ResolveFailure::UpstreamStatus(status));
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| ResolveFailure::UnparsableBody(e.to_string()))?;
        debug!(slug, bytes = body.len(), "Received course data response");

        let candidate = locate_document(&payload).map_err(ResolveFailure::MalformedShape)?;
        parse_document(candidate.clone()).map_err(ResolveFailure::Invalid)
    }

    /// One GET under the overall timeout; the request is dropped when it expires.
    async fn get(&self, url: Url) -> std::result::Result<(u16, String), ResolveFailure> {
        let request = async {
            let response = self.http_client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(ResolveFailure::Network(e)),
            Err(_) => Err(ResolveFailure::Timeout),
        }
    }
}

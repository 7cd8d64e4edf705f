//! Configuration types for course-content

use crate::error::{Error, Result};
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};
use utoipa::ToSchema;

/// Catalog and cache settings for content resolution
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentConfig {
    /// Product catalog endpoint; documents live at `{base_url}/{slug}`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long a resolved document is served from cache, in milliseconds (default: 1 hour)
    #[serde(default = "default_cache_duration", with = "duration_ms_serde")]
    #[schema(value_type = u64)]
    pub cache_duration: Duration,

    /// Overall timeout for one catalog request, headers and body, in milliseconds (default: 10 seconds)
    #[serde(default = "default_request_timeout", with = "duration_ms_serde")]
    #[schema(value_type = u64)]
    pub request_timeout: Duration,

    /// Course served at `/` (default: "ielts-course")
    #[serde(default = "default_slug")]
    pub default_slug: String,

    /// Language used when a request does not name one (default: en)
    #[serde(default)]
    pub default_language: Language,

    /// Value of the `X-TENMS-SOURCE-PLATFORM` header (default: "web")
    #[serde(default = "default_source_platform")]
    pub source_platform: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cache_duration: default_cache_duration(),
            request_timeout: default_request_timeout(),
            default_slug: default_slug(),
            default_language: Language::default(),
            source_platform: default_source_platform(),
        }
    }
}

/// Main configuration for course-content
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Content resolution (catalog endpoint, cache, timeouts)
    #[serde(default)]
    pub content: ContentConfig,

    /// API and external server integration
    #[serde(flatten)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Check settings that would otherwise only fail at request time
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.content.base_url).map_err(|e| Error::Config {
            message: format!("invalid catalog base URL: {}", e),
            key: Some("base_url".to_string()),
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("catalog base URL cannot have paths: {}", base),
                key: Some("base_url".to_string()),
            });
        }
        if self.content.request_timeout.is_zero() {
            return Err(Error::Config {
                message: "request timeout must be greater than zero".to_string(),
                key: Some("request_timeout".to_string()),
            });
        }
        if self.content.cache_duration.is_zero() {
            return Err(Error::Config {
                message: "cache duration must be greater than zero".to_string(),
                key: Some("cache_duration".to_string()),
            });
        }
        if self.content.default_slug.trim().is_empty() {
            return Err(Error::Config {
                message: "default slug must not be empty".to_string(),
                key: Some("default_slug".to_string()),
            });
        }
        Ok(())
    }
}

/// API and external server integration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerIntegrationConfig {
    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API server configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

fn default_base_url() -> String {
    "https://api.10minuteschool.com/discovery-service/api/v1/products".into()
}

fn default_cache_duration() -> Duration {
    Duration::from_millis(3_600_000)
}

fn default_request_timeout() -> Duration {
    Duration::from_millis(10_000)
}

fn default_slug() -> String {
    "ielts-course".into()
}

fn default_source_platform() -> String {
    "web".into()
}

fn default_true() -> bool {
    true
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

// Durations are configured in milliseconds
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

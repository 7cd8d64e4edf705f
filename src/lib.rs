//! # course-content
//!
//! Content pipeline for the IELTS course landing page.
//!
//! A [`CatalogClient`] resolves a course document for a `(slug, language)`
//! pair: a fresh cache entry is served as-is, otherwise the remote catalog is
//! queried (bounded by a timeout), the response is shape-checked and
//! validated, and the result is cached. Any failure along the way yields the
//! bundled fallback document instead, so the page always has something to
//! render.
//!
//! ## Quick Start
//!
//! ```no_run
//! use course_content::{CatalogClient, Config, Language};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = CatalogClient::new(&config.content)?;
//!
//!     let document = client.resolve_content("ielts-course", Language::En).await;
//!     println!("{}", document.title);
//!
//!     // Bulk listing surfaces typed errors instead of falling back
//!     match client.fetch_courses(Language::Bn).await {
//!         Ok(courses) => println!("{} courses", courses.len()),
//!         Err(e) => eprintln!("listing failed ({}): {}", e.status(), e),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// TTL cache of resolved documents
pub mod cache;
/// Remote catalog client and resolution pipeline
pub mod catalog;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Bundled fallback document
pub mod fallback;
/// Page meta tags
pub mod meta;
/// Core content types
pub mod types;
/// Utility functions
pub mod utils;
/// Response shape rules and document validation
pub mod validator;

use std::sync::Arc;

// Re-export commonly used types
pub use cache::ContentCache;
pub use catalog::CatalogClient;
pub use config::{ApiConfig, Config, ContentConfig};
pub use error::{ApiError, CatalogError, Error, ErrorDetail, Result, ToHttpStatus, ValidationError};
pub use fallback::fallback_document;
pub use meta::{MetaTags, generate_meta_tags};
pub use types::{CacheStats, ContentDocument, Language};
pub use validator::{is_valid_document, parse_document, validate_document};

/// Validate `config`, build a catalog client and serve the REST API until a
/// termination signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use course_content::{Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_with_shutdown(Config::default()).await?;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(config: Config) -> Result<()> {
    config.validate()?;
    let client = Arc::new(CatalogClient::new(&config.content)?);
    api::start_api_server(client, Arc::new(config)).await
}

#[cfg(unix)]
pub(crate) async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            sigint.recv().await;
            tracing::info!("Received SIGINT signal (Ctrl+C)");
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        (Err(e), Err(_)) => {
            tracing::error!(error = %e, "Could not register any signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}

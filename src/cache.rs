//! In-memory content cache with lazy expiry
//!
//! Entries are keyed by `"{slug}-{language}"` and stamped with the wall-clock
//! time they were stored. There is no background eviction: an entry older than
//! the configured duration is simply ignored on lookup and replaced by the next
//! successful fetch.

use crate::types::{CacheStats, ContentDocument, Language};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Build the cache key for a (slug, language) pair
pub fn cache_key(slug: &str, language: Language) -> String {
    format!("{}-{}", slug, language)
}

/// A cached document and the time it was fetched
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// The validated document
    pub document: Arc<ContentDocument>,
    /// When the document was stored
    pub fetched_at: DateTime<Utc>,
}

/// Shared, time-bounded document cache.
///
/// Wrap in an `Arc` and hand the same instance to every client that should
/// share entries.
#[derive(Debug)]
pub struct ContentCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: chrono::Duration,
}

impl ContentCache {
    /// Create an empty cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Fresh document for `key`, if any
    pub async fn get(&self, key: &str) -> Option<Arc<ContentDocument>> {
        self.get_at(key, Utc::now()).await
    }

    /// Fresh document for `key` as seen at `now`.
    ///
    /// An entry is fresh while `now - fetched_at < ttl`.
    pub async fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Arc<ContentDocument>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| now.signed_duration_since(entry.fetched_at) < self.ttl)
            .map(|entry| Arc::clone(&entry.document))
    }

    /// Store `document` under `key`, replacing any previous entry
    pub async fn put(&self, key: impl Into<String>, document: Arc<ContentDocument>) {
        self.put_at(key, document, Utc::now()).await;
    }

    /// Store `document` under `key` as fetched at `fetched_at`
    pub async fn put_at(
        &self,
        key: impl Into<String>,
        document: Arc<ContentDocument>,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries.write().await.insert(
            key.into(),
            CacheEntry {
                document,
                fetched_at,
            },
        );
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Entry count and keys, expired entries included
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            size: entries.len(),
            entries: keys,
        }
    }
}

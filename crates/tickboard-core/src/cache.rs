//! In-memory caching for chart responses.
//!
//! Entries are never purged in the background. Freshness is decided on
//! read by comparing an entry's age against the TTL, so an expired entry
//! simply stops being returned until it is overwritten.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// Defines the behavior of the in-memory cache for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read from the cache if a fresh entry is present;
    /// otherwise, fetch from the network and write the response to the cache. (Default)
    #[default]
    Use,
    /// Always fetch from the network, bypassing any cached entry,
    /// and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}

impl CacheMode {
    pub const fn reads(self) -> bool {
        matches!(self, Self::Use)
    }

    pub const fn writes(self) -> bool {
        matches!(self, Self::Use | Self::Refresh)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    stored_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl CacheInner {
    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) < self.ttl
    }

    fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.map
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.body.clone())
    }

    fn put(&mut self, key: String, body: String) {
        if let Some(max) = self.max_entries {
            if !self.map.contains_key(&key) && self.map.len() >= max {
                self.evict_oldest();
            }
        }

        let stored_at = Instant::now();
        self.map.insert(key, CacheEntry { body, stored_at });
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .map
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.map.remove(&key);
        }
    }

    fn clear_expired(&mut self) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.map
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
    }
}

/// Shared response cache keyed by request URL.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl CacheStore {
    /// Create an unbounded cache store with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, None)
    }

    /// Create a cache store that keeps at most `max_entries` entries,
    /// evicting the oldest one when full.
    pub fn with_capacity(ttl: Duration, max_entries: Option<usize>) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner {
                map: HashMap::new(),
                ttl,
                max_entries: max_entries.filter(|max| *max > 0),
            })),
        }
    }

    /// Create a cache store with a TTL of 5 minutes.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(300))
    }

    /// Create a disabled cache.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Get a cached body if its age is below the TTL.
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.read().await;
        store.get(key)
    }

    /// Store a body under `key`, stamped with the current time.
    ///
    /// A disabled cache (TTL is ZERO) ignores writes.
    pub async fn put(&self, key: String, body: String) {
        let mut store = self.inner.write().await;

        if store.ttl == Duration::ZERO {
            return;
        }

        store.put(key, body);
    }

    /// Age of the entry under `key`, fresh or not.
    pub async fn entry_age(&self, key: &str) -> Option<Duration> {
        let store = self.inner.read().await;
        store
            .map
            .get(key)
            .map(|entry| Instant::now().saturating_duration_since(entry.stored_at))
    }

    /// Remove expired entries from the cache.
    pub async fn clear_expired(&self) {
        let mut store = self.inner.write().await;
        store.clear_expired();
    }

    /// Clear all entries from the cache.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.map.clear();
    }

    /// Number of entries, including expired ones not yet overwritten.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn is_disabled(&self) -> bool {
        let store = self.inner.read().await;
        store.ttl == Duration::ZERO
    }
}

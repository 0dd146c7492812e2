//! Keyed in-memory cache for fetched provider responses.
//!
//! Keys are canonical strings built from the request tuple (endpoint,
//! symbol, and for history the date range and interval); values are the
//! serialized response plus its fetch timestamp, judged fresh against an
//! explicit TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{DateRange, Interval, Symbol};

/// Cache behavior for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read a fresh entry if present, otherwise fetch and store.
    #[default]
    Use,
    /// Always fetch, then overwrite the cached entry.
    Refresh,
    /// Always fetch; neither read nor write the cache.
    Bypass,
}

/// Canonical key for a history fetch.
pub fn history_key(symbol: &Symbol, range: &DateRange, interval: Interval) -> String {
    format!(
        "history:{symbol}:{}:{}:{interval}",
        range.start.format_iso(),
        range.end.format_iso()
    )
}

/// Canonical key for a live quote fetch.
pub fn quote_key(symbol: &Symbol) -> String {
    format!("quote:{symbol}")
}

/// Canonical key for a financial statement fetch.
pub fn financials_key(symbol: &Symbol) -> String {
    format!("financials:{symbol}")
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl CacheInner {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).and_then(|entry| {
            if entry.fetched_at.elapsed() <= self.ttl {
                Some(entry.body.clone())
            } else {
                None
            }
        })
    }
}

/// Thread-safe TTL cache for serialized fetch results.
#[derive(Debug, Clone)]
pub struct FetchCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl FetchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner {
                map: HashMap::new(),
                ttl,
            })),
        }
    }

    /// Default TTL of 5 minutes.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(300))
    }

    /// A zero-TTL cache never stores and never serves.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Fresh entry for the key, if any.
    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.read().await;
        store.get(key)
    }

    /// Store a value stamped with the current fetch time. No-op when
    /// disabled.
    pub async fn put(&self, key: String, body: String) {
        let mut store = self.inner.write().await;
        if store.ttl == Duration::ZERO {
            return;
        }
        store.map.insert(
            key,
            CacheEntry {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop entries past their TTL.
    pub async fn evict_expired(&self) {
        let mut store = self.inner.write().await;
        let ttl = store.ttl;
        store.map.retain(|_, entry| entry.fetched_at.elapsed() <= ttl);
    }

    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.map.clear();
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol() -> Symbol {
        Symbol::parse("GOOGL").expect("test symbol")
    }

    #[test]
    fn keys_are_canonical() {
        let start = crate::TradingDate::parse("2020-01-01").expect("date");
        let end = crate::TradingDate::parse("2020-01-10").expect("date");
        let range = DateRange::new(start, end).expect("range");
        assert_eq!(
            history_key(&symbol(), &range, Interval::Daily),
            "history:GOOGL:2020-01-01:2020-01-10:1d"
        );
        assert_eq!(quote_key(&symbol()), "quote:GOOGL");
        assert_eq!(financials_key(&symbol()), "financials:GOOGL");
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let cache = FetchCache::new(Duration::from_secs(60));
        assert!(cache.get("quote:GOOGL").await.is_none());

        cache
            .put(String::from("quote:GOOGL"), String::from("{\"open\":1}"))
            .await;
        assert_eq!(
            cache.get("quote:GOOGL").await.as_deref(),
            Some("{\"open\":1}")
        );
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = FetchCache::new(Duration::from_millis(50));
        cache.put(String::from("k"), String::from("v")).await;
        assert!(cache.get("k").await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.get("k").await.is_none());

        cache.evict_expired().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn disabled_cache_stores_nothing() {
        let cache = FetchCache::disabled();
        cache.put(String::from("k"), String::from("v")).await;
        assert!(cache.get("k").await.is_none());
        assert!(cache.is_empty().await);
    }
}

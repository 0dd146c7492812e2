//! Caching decorator over any market data source.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::{financials_key, history_key, quote_key, CacheMode, FetchCache};
use crate::provider::{FetchError, MarketDataSource};
use crate::{DateRange, FinancialStatement, Interval, QuoteInfo, RawPriceTable, Symbol};

/// Wraps a source with a keyed TTL cache so re-renders with unchanged
/// inputs skip the network round-trip. Any key component change (symbol,
/// range, interval) naturally misses.
pub struct CachedSource {
    inner: Arc<dyn MarketDataSource>,
    cache: FetchCache,
    mode: CacheMode,
}

impl CachedSource {
    pub fn new(inner: Arc<dyn MarketDataSource>, cache: FetchCache, mode: CacheMode) -> Self {
        Self { inner, cache, mode }
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    async fn through_cache<T, F>(&self, key: String, fetch: F) -> Result<T, FetchError>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T, FetchError>>,
    {
        if self.mode == CacheMode::Use {
            if let Some(body) = self.cache.get(&key).await {
                debug!(%key, "cache hit");
                return serde_json::from_str(&body).map_err(|e| {
                    FetchError::internal(format!("corrupt cache entry for '{key}': {e}"))
                });
            }
            debug!(%key, "cache miss");
        }

        let value = fetch.await?;

        if self.mode != CacheMode::Bypass {
            match serde_json::to_string(&value) {
                Ok(body) => self.cache.put(key, body).await,
                Err(e) => debug!(%key, error = %e, "skipping cache write"),
            }
        }

        Ok(value)
    }
}

impl MarketDataSource for CachedSource {
    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteInfo, FetchError>> + Send + 'a>> {
        Box::pin(self.through_cache(quote_key(symbol), self.inner.quote(symbol)))
    }

    fn history<'a>(
        &'a self,
        symbol: &'a Symbol,
        range: DateRange,
        interval: Interval,
    ) -> Pin<Box<dyn Future<Output = Result<RawPriceTable, FetchError>> + Send + 'a>> {
        Box::pin(self.through_cache(
            history_key(symbol, &range, interval),
            self.inner.history(symbol, range, interval),
        ))
    }

    fn financials<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<FinancialStatement, FetchError>> + Send + 'a>> {
        Box::pin(self.through_cache(financials_key(symbol), self.inner.financials(symbol)))
    }
}

//! Cache-aside helper shared by the cached decorators.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::cache::MemoryCache;

/// Binds a shared [`MemoryCache`] to the expiration used for one record kind.
///
/// Concurrent misses on the same key each run the loader and each store the
/// result; the last write wins.
#[derive(Clone)]
pub struct CacheAside {
    cache: Arc<MemoryCache>,
    expiration_minutes: Option<u32>,
}

impl CacheAside {
    pub fn new(cache: Arc<MemoryCache>, expiration_minutes: Option<u32>) -> Self {
        Self {
            cache,
            expiration_minutes,
        }
    }

    pub fn cache(&self) -> &Arc<MemoryCache> {
        &self.cache
    }

    /// Returns the cached value under `key`, or runs `load` and caches its
    /// successful result. Errors from `load` are returned and nothing is cached.
    pub async fn load<T, E, F, Fut>(&self, key: &str, load: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.cache.try_get::<T>(key) {
            debug!(key, "cache hit");
            return Ok(hit);
        }

        let value = load().await?;
        self.cache.set(key, value.clone(), self.expiration_minutes);
        Ok(value)
    }

    /// Drops `key`. Call only after the mutation it follows has succeeded.
    pub fn invalidate(&self, key: &str) {
        self.cache.remove(key);
    }

    pub fn invalidate_matching(&self, pattern: &str) -> usize {
        self.cache.remove_by_pattern(pattern)
    }
}

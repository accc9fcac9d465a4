//! In-memory key/value cache with absolute expiration and pattern removal.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use metrics::counter;
use tracing::{debug, warn};

use super::keys::glob_matches;
use super::lock::RecoverPoison;

const ENTRIES: &str = "entries";
const TRACKED: &str = "tracked_keys";

pub const METRIC_CACHE_HIT: &str = "roster_cache_hit_total";
pub const METRIC_CACHE_MISS: &str = "roster_cache_miss_total";
pub const METRIC_CACHE_SET: &str = "roster_cache_set_total";
pub const METRIC_CACHE_INVALIDATE: &str = "roster_cache_invalidate_total";

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Process-wide cache shared by every request.
///
/// Values are stored type-erased; a reader asking for a different type than the
/// one stored sees a miss. Alongside the expiring entry map the cache keeps the
/// set of keys it has been asked to `set`. Expired entries stay in both until a
/// writer removes them or [`MemoryCache::purge_expired`] reconciles the two.
///
/// Writers serialize on the tracked-key mutex, then take the entry lock.
/// Readers only take the entry lock.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    tracked: Mutex<HashSet<String>>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            tracked: Mutex::new(HashSet::new()),
        }
    }

    /// Returns a clone of the live value stored under `key`.
    ///
    /// Missing, expired and differently-typed entries all read as `None`.
    pub fn try_get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + 'static,
    {
        if key.trim().is_empty() {
            return None;
        }

        let value = {
            let entries = self.entries.read().recover("try_get", ENTRIES);
            entries
                .get(key)
                .filter(|entry| !entry.is_expired(Instant::now()))
                .and_then(|entry| entry.value.downcast_ref::<T>())
                .cloned()
        };

        if value.is_some() {
            counter!(METRIC_CACHE_HIT).increment(1);
        } else {
            counter!(METRIC_CACHE_MISS).increment(1);
        }
        value
    }

    /// Stores `value`, replacing any previous entry.
    ///
    /// A positive `absolute_expiration_minutes` makes the entry unreadable once that
    /// much wall-clock time has passed; `None` or `Some(0)` keeps it until removed.
    pub fn set<T>(&self, key: &str, value: T, absolute_expiration_minutes: Option<u32>)
    where
        T: Send + Sync + 'static,
    {
        let ttl = absolute_expiration_minutes
            .filter(|minutes| *minutes > 0)
            .map(|minutes| Duration::from_secs(u64::from(minutes) * 60));
        self.set_with_ttl(key, value, ttl);
    }

    pub fn set_with_ttl<T>(&self, key: &str, value: T, ttl: Option<Duration>)
    where
        T: Send + Sync + 'static,
    {
        if key.trim().is_empty() {
            warn!(op = "set", "Ignoring cache write with a blank key");
            return;
        }

        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| Instant::now().checked_add(ttl));
        let entry = CacheEntry {
            value: Arc::new(value),
            expires_at,
        };

        let mut tracked = self.tracked.lock().recover("set", TRACKED);
        self.entries
            .write()
            .recover("set", ENTRIES)
            .insert(key.to_string(), entry);
        tracked.insert(key.to_string());
        counter!(METRIC_CACHE_SET).increment(1);
    }

    /// Drops the entry under `key`; absent keys are ignored.
    pub fn remove(&self, key: &str) {
        if key.trim().is_empty() {
            return;
        }

        let mut tracked = self.tracked.lock().recover("remove", TRACKED);
        self.entries.write().recover("remove", ENTRIES).remove(key);
        tracked.remove(key);
        counter!(METRIC_CACHE_INVALIDATE).increment(1);
        debug!(key, "Cache entry invalidated");
    }

    /// Drops every tracked key matching the glob `pattern` and returns how many
    /// keys were removed.
    pub fn remove_by_pattern(&self, pattern: &str) -> usize {
        if pattern.trim().is_empty() {
            return 0;
        }

        let mut tracked = self.tracked.lock().recover("remove_by_pattern", TRACKED);
        let matching: Vec<String> = tracked
            .iter()
            .filter(|key| glob_matches(pattern, key))
            .cloned()
            .collect();

        let mut entries = self.entries.write().recover("remove_by_pattern", ENTRIES);
        for key in &matching {
            entries.remove(key);
            tracked.remove(key);
        }
        drop(entries);

        counter!(METRIC_CACHE_INVALIDATE).increment(matching.len() as u64);
        debug!(pattern, removed = matching.len(), "Cache entries invalidated by pattern");
        matching.len()
    }

    /// Evicts expired entries from the store and the tracked-key set.
    pub fn purge_expired(&self) -> usize {
        let mut tracked = self.tracked.lock().recover("purge_expired", TRACKED);
        let mut entries = self.entries.write().recover("purge_expired", ENTRIES);
        let now = Instant::now();

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.remove(key);
        }
        tracked.retain(|key| entries.contains_key(key));
        expired.len()
    }

    pub fn clear(&self) {
        let mut tracked = self.tracked.lock().recover("clear", TRACKED);
        self.entries.write().recover("clear", ENTRIES).clear();
        tracked.clear();
    }

    /// Number of entries that are still readable.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .recover("len", ENTRIES)
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently tracked for pattern removal, sorted.
    pub fn tracked_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .tracked
            .lock()
            .recover("tracked_keys", TRACKED)
            .iter()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

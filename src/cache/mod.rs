//! Roster cache.
//!
//! A single in-process [`MemoryCache`] is created at startup and shared by the
//! cache-aside decorators in [`crate::application`]. Entries carry an optional
//! absolute expiration; writers invalidate by exact key or by glob pattern over
//! the keys the cache has tracked.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! countries_ttl_minutes = 60
//! persons_ttl_minutes = 10
//! ```

mod config;
pub mod keys;
mod lock;
mod store;

pub use config::CacheConfig;
pub use keys::glob_matches;
pub use store::{
    METRIC_CACHE_HIT, METRIC_CACHE_INVALIDATE, METRIC_CACHE_MISS, METRIC_CACHE_SET, MemoryCache,
};

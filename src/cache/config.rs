//! Cache configuration.
//!
//! Controls whether cache-aside decorators are wired in and how long entries live.

use serde::Deserialize;

const DEFAULT_COUNTRIES_TTL_MINUTES: u32 = 60;
const DEFAULT_PERSONS_TTL_MINUTES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Wrap the stores and services in cache-aside decorators.
    pub enabled: bool,
    /// Absolute expiration for the countries list; 0 keeps it until invalidated.
    pub countries_ttl_minutes: u32,
    /// Absolute expiration for person entries; 0 keeps them until invalidated.
    pub persons_ttl_minutes: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            countries_ttl_minutes: DEFAULT_COUNTRIES_TTL_MINUTES,
            persons_ttl_minutes: DEFAULT_PERSONS_TTL_MINUTES,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            countries_ttl_minutes: settings.countries_ttl_minutes,
            persons_ttl_minutes: settings.persons_ttl_minutes,
        }
    }
}

impl CacheConfig {
    pub fn countries_expiration(&self) -> Option<u32> {
        non_zero(self.countries_ttl_minutes)
    }

    pub fn persons_expiration(&self) -> Option<u32> {
        non_zero(self.persons_ttl_minutes)
    }
}

fn non_zero(minutes: u32) -> Option<u32> {
    (minutes > 0).then_some(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.countries_expiration(), Some(60));
        assert_eq!(config.persons_expiration(), Some(10));
    }

    #[test]
    fn zero_minutes_means_no_expiration() {
        let config = CacheConfig {
            countries_ttl_minutes: 0,
            persons_ttl_minutes: 0,
            ..Default::default()
        };
        assert_eq!(config.countries_expiration(), None);
        assert_eq!(config.persons_expiration(), None);
    }
}

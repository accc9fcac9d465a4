use std::sync::Arc;

use tracing::info;

use crate::application::cache_aside::CacheAside;
use crate::application::countries::{CachedCountriesService, CountriesService, CountryService};
use crate::application::persons::{CachedPersonsRepo, PersonService};
use crate::application::repos::{CountriesRepo, PersonsRepo};
use crate::cache::{CacheConfig, MemoryCache};
use crate::domain::clock::Clock;

/// The services exposed to callers, wired over one set of stores.
#[derive(Clone)]
pub struct ApplicationServices {
    pub countries: Arc<dyn CountriesService>,
    pub persons: PersonService,
    cache: Option<Arc<MemoryCache>>,
}

impl ApplicationServices {
    /// Wraps the stores in cache-aside decorators over `cache` when caching is
    /// enabled in `config`.
    pub fn new(
        countries_repo: Arc<dyn CountriesRepo>,
        persons_repo: Arc<dyn PersonsRepo>,
        cache: Arc<MemoryCache>,
        config: &CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let raw_countries: Arc<dyn CountriesService> =
            Arc::new(CountryService::new(countries_repo.clone()));

        if !config.enabled {
            info!("Caching disabled");
            return Self {
                countries: raw_countries,
                persons: PersonService::new(persons_repo, countries_repo, clock),
                cache: None,
            };
        }

        let countries: Arc<dyn CountriesService> = Arc::new(CachedCountriesService::new(
            raw_countries,
            CacheAside::new(cache.clone(), config.countries_expiration()),
        ));
        let persons_repo: Arc<dyn PersonsRepo> = Arc::new(CachedPersonsRepo::new(
            persons_repo,
            CacheAside::new(cache.clone(), config.persons_expiration()),
        ));

        Self {
            countries,
            persons: PersonService::new(persons_repo, countries_repo, clock),
            cache: Some(cache),
        }
    }

    /// The shared cache, when caching is enabled.
    pub fn cache(&self) -> Option<&Arc<MemoryCache>> {
        self.cache.as_ref()
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::cache_aside::CacheAside;
use crate::application::countries::service::CountriesService;
use crate::application::countries::types::{CountryAddRequest, CountryResponse};
use crate::application::error::AppError;
use crate::cache::keys::COUNTRIES_ALL;

/// Serves `get_all_countries` from the cache and drops the cached list after
/// every successful write.
#[derive(Clone)]
pub struct CachedCountriesService {
    inner: Arc<dyn CountriesService>,
    cache: CacheAside,
}

impl CachedCountriesService {
    pub fn new(inner: Arc<dyn CountriesService>, cache: CacheAside) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl CountriesService for CachedCountriesService {
    async fn add_country(
        &self,
        request: Option<CountryAddRequest>,
    ) -> Result<CountryResponse, AppError> {
        let added = self.inner.add_country(request).await?;
        self.cache.invalidate(COUNTRIES_ALL);
        Ok(added)
    }

    async fn get_all_countries(&self) -> Result<Vec<CountryResponse>, AppError> {
        self.cache
            .load(COUNTRIES_ALL, || self.inner.get_all_countries())
            .await
    }

    async fn get_country(&self, id: Option<Uuid>) -> Result<Option<CountryResponse>, AppError> {
        self.inner.get_country(id).await
    }

    async fn import_countries(&self, names: Vec<String>) -> Result<usize, AppError> {
        let added = self.inner.import_countries(names).await?;
        self.cache.invalidate(COUNTRIES_ALL);
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cache::MemoryCache;

    #[derive(Default)]
    struct CountingCountries {
        countries: Mutex<Vec<CountryResponse>>,
        list_calls: AtomicUsize,
        fail_writes: bool,
    }

    #[async_trait]
    impl CountriesService for CountingCountries {
        async fn add_country(
            &self,
            request: Option<CountryAddRequest>,
        ) -> Result<CountryResponse, AppError> {
            if self.fail_writes {
                return Err(AppError::validation("rejected"));
            }
            let name = request
                .and_then(|request| request.name)
                .ok_or(AppError::MissingArgument("request"))?;
            let added = CountryResponse {
                id: Uuid::new_v4(),
                name,
            };
            self.countries.lock().unwrap().push(added.clone());
            Ok(added)
        }

        async fn get_all_countries(&self) -> Result<Vec<CountryResponse>, AppError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.countries.lock().unwrap().clone())
        }

        async fn get_country(
            &self,
            id: Option<Uuid>,
        ) -> Result<Option<CountryResponse>, AppError> {
            Ok(self
                .countries
                .lock()
                .unwrap()
                .iter()
                .find(|country| Some(country.id) == id)
                .cloned())
        }

        async fn import_countries(&self, names: Vec<String>) -> Result<usize, AppError> {
            let count = names.len();
            for name in names {
                self.add_country(Some(CountryAddRequest::named(name))).await?;
            }
            Ok(count)
        }
    }

    fn cached(inner: &Arc<CountingCountries>) -> (CachedCountriesService, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new());
        let service =
            CachedCountriesService::new(inner.clone(), CacheAside::new(cache.clone(), Some(60)));
        (service, cache)
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let inner = Arc::new(CountingCountries::default());
        inner.add_country(Some(CountryAddRequest::named("Chile"))).await.unwrap();
        let (service, cache) = cached(&inner);

        let first = service.get_all_countries().await.unwrap();
        let second = service.get_all_countries().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.tracked_keys(), vec![COUNTRIES_ALL.to_string()]);
    }

    #[tokio::test]
    async fn add_invalidates_cached_list() {
        let inner = Arc::new(CountingCountries::default());
        let (service, _) = cached(&inner);

        assert!(service.get_all_countries().await.unwrap().is_empty());
        service
            .add_country(Some(CountryAddRequest::named("Peru")))
            .await
            .unwrap();

        let after = service.get_all_countries().await.unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].name, "Peru");
        assert_eq!(inner.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn import_invalidates_cached_list() {
        let inner = Arc::new(CountingCountries::default());
        let (service, _) = cached(&inner);

        service.get_all_countries().await.unwrap();
        service
            .import_countries(vec!["Peru".into(), "Chile".into()])
            .await
            .unwrap();

        assert_eq!(service.get_all_countries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_write_leaves_cache_untouched() {
        let inner = Arc::new(CountingCountries {
            fail_writes: true,
            ..Default::default()
        });
        let (service, cache) = cached(&inner);

        service.get_all_countries().await.unwrap();
        let err = service
            .add_country(Some(CountryAddRequest::named("Peru")))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(cache.tracked_keys(), vec![COUNTRIES_ALL.to_string()]);
        service.get_all_countries().await.unwrap();
        assert_eq!(inner.list_calls.load(Ordering::SeqCst), 1);
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use roster::application::countries::CountryAddRequest;
use roster::application::repos::{CountriesRepo, PersonsRepo};
use roster::application::services::ApplicationServices;
use roster::cache::{
    CacheConfig, METRIC_CACHE_HIT, METRIC_CACHE_INVALIDATE, METRIC_CACHE_MISS, METRIC_CACHE_SET,
    MemoryCache,
};
use roster::domain::clock::SystemClock;
use roster::infra::memory::InMemoryRepositories;

#[tokio::test]
async fn cache_aside_paths_emit_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let store = Arc::new(InMemoryRepositories::new());
    let countries_repo: Arc<dyn CountriesRepo> = store.clone();
    let persons_repo: Arc<dyn PersonsRepo> = store;
    let services = ApplicationServices::new(
        countries_repo,
        persons_repo,
        Arc::new(MemoryCache::new()),
        &CacheConfig::default(),
        Arc::new(SystemClock),
    );

    // miss + set, then hit
    services.countries.get_all_countries().await.unwrap();
    services.countries.get_all_countries().await.unwrap();

    // write invalidates the countries list
    services
        .countries
        .add_country(Some(CountryAddRequest::named("Chile")))
        .await
        .unwrap();
    services.countries.get_all_countries().await.unwrap();

    let counters: HashMap<String, u64> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(composite_key, _, _, value)| match value {
            DebugValue::Counter(count) => Some((composite_key.key().name().to_string(), count)),
            _ => None,
        })
        .collect();

    let expected = [
        METRIC_CACHE_HIT,
        METRIC_CACHE_MISS,
        METRIC_CACHE_SET,
        METRIC_CACHE_INVALIDATE,
    ];
    for metric in expected {
        assert!(counters.contains_key(metric), "missing metric: {metric}");
    }

    assert_eq!(counters[METRIC_CACHE_HIT], 1);
    assert_eq!(counters[METRIC_CACHE_MISS], 2);
    assert_eq!(counters[METRIC_CACHE_SET], 2);
}

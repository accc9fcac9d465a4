use std::sync::Arc;

use roster::application::countries::CountryAddRequest;
use roster::application::error::AppError;
use roster::application::persons::PersonAddRequest;
use roster::application::repos::{CountriesRepo, PersonsRepo};
use roster::application::services::ApplicationServices;
use roster::cache::keys::{COUNTRIES_ALL, PERSONS_ALL, person_by_id};
use roster::cache::{CacheConfig, MemoryCache};
use roster::domain::clock::FixedClock;
use roster::domain::types::{Gender, PersonField, SortDirection};
use roster::infra::memory::InMemoryRepositories;
use time::macros::date;
use uuid::Uuid;

struct Harness {
    services: ApplicationServices,
    store: Arc<InMemoryRepositories>,
    cache: Arc<MemoryCache>,
}

fn harness(config: CacheConfig) -> Harness {
    let store = Arc::new(InMemoryRepositories::new());
    let cache = Arc::new(MemoryCache::new());
    let countries: Arc<dyn CountriesRepo> = store.clone();
    let persons: Arc<dyn PersonsRepo> = store.clone();
    let services = ApplicationServices::new(
        countries,
        persons,
        cache.clone(),
        &config,
        Arc::new(FixedClock(date!(2024 - 03 - 10))),
    );
    Harness {
        services,
        store,
        cache,
    }
}

fn person(name: &str, email: &str) -> PersonAddRequest {
    PersonAddRequest {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn country_list_is_served_from_cache_until_a_write() {
    let h = harness(CacheConfig::default());
    let countries = &h.services.countries;

    countries
        .add_country(Some(CountryAddRequest::named("Chile")))
        .await
        .unwrap();
    assert_eq!(countries.get_all_countries().await.unwrap().len(), 1);
    assert!(h.cache.tracked_keys().contains(&COUNTRIES_ALL.to_string()));

    // Bypassing the service leaves the cached list stale.
    h.store
        .add_country(roster::domain::entities::CountryRecord {
            id: Uuid::new_v4(),
            name: "Peru".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(countries.get_all_countries().await.unwrap().len(), 1);

    countries
        .add_country(Some(CountryAddRequest::named("Bolivia")))
        .await
        .unwrap();
    let names: Vec<String> = countries
        .get_all_countries()
        .await
        .unwrap()
        .into_iter()
        .map(|country| country.name)
        .collect();
    assert_eq!(names, vec!["Chile", "Peru", "Bolivia"]);
}

#[tokio::test]
async fn duplicate_country_is_rejected_without_touching_the_cache() {
    let h = harness(CacheConfig::default());
    let countries = &h.services.countries;

    countries
        .add_country(Some(CountryAddRequest::named("Chile")))
        .await
        .unwrap();
    countries.get_all_countries().await.unwrap();

    let err = countries
        .add_country(Some(CountryAddRequest::named("  Chile ")))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.exit_code(), 3);
    assert!(h.cache.tracked_keys().contains(&COUNTRIES_ALL.to_string()));
    assert_eq!(CountriesRepo::list_all(h.store.as_ref()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn import_skips_known_and_repeated_names() {
    let h = harness(CacheConfig::default());
    let countries = &h.services.countries;
    countries
        .add_country(Some(CountryAddRequest::named("Chile")))
        .await
        .unwrap();

    let added = countries
        .import_countries(vec![
            "Peru".into(),
            "".into(),
            "Chile".into(),
            " Peru ".into(),
            "Bolivia".into(),
        ])
        .await
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(countries.get_all_countries().await.unwrap().len(), 3);
}

#[tokio::test]
async fn person_writes_invalidate_every_person_entry() {
    let h = harness(CacheConfig::default());
    let persons = &h.services.persons;

    let ana = persons
        .add_person(Some(person("Ana", "ana@example.com")))
        .await
        .unwrap();
    persons.get_all_persons().await.unwrap();
    persons.get_person(Some(ana.id)).await.unwrap();

    let mut tracked = h.cache.tracked_keys();
    tracked.sort();
    let mut expected = vec![PERSONS_ALL.to_string(), person_by_id(ana.id)];
    expected.sort();
    assert_eq!(tracked, expected);

    persons
        .add_person(Some(person("Bo", "bo@example.com")))
        .await
        .unwrap();
    assert!(h.cache.tracked_keys().is_empty());
    assert_eq!(persons.get_all_persons().await.unwrap().len(), 2);
}

#[tokio::test]
async fn person_projection_resolves_country_and_age() {
    let h = harness(CacheConfig::default());
    let chile = h
        .services
        .countries
        .add_country(Some(CountryAddRequest::named("Chile")))
        .await
        .unwrap();

    let added = h
        .services
        .persons
        .add_person(Some(PersonAddRequest {
            date_of_birth: Some(date!(1990 - 03 - 11)),
            gender: Some(Gender::Female),
            country_id: Some(chile.id),
            ..person("Ana", "ana@example.com")
        }))
        .await
        .unwrap();

    assert_eq!(added.country.as_deref(), Some("Chile"));
    assert_eq!(added.gender.as_deref(), Some("Female"));
    assert_eq!(added.age, Some(33));
}

#[tokio::test]
async fn unknown_country_reference_is_a_validation_error() {
    let h = harness(CacheConfig::default());
    let err = h
        .services
        .persons
        .add_person(Some(PersonAddRequest {
            country_id: Some(Uuid::new_v4()),
            ..person("Ana", "ana@example.com")
        }))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::InvalidReference {
            entity: "country",
            ..
        }
    ));
    assert!(PersonsRepo::list_all(h.store.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_unknown_or_missing_ids_reports_false() {
    let h = harness(CacheConfig::default());
    let persons = &h.services.persons;

    assert!(!persons.delete_person(None).await.unwrap());
    assert!(!persons.delete_person(Some(Uuid::new_v4())).await.unwrap());

    let ana = persons
        .add_person(Some(person("Ana", "ana@example.com")))
        .await
        .unwrap();
    assert!(persons.delete_person(Some(ana.id)).await.unwrap());
    assert_eq!(persons.get_person(Some(ana.id)).await.unwrap(), None);
}

#[tokio::test]
async fn filter_then_sort() {
    let h = harness(CacheConfig::default());
    let persons = &h.services.persons;
    for (name, email) in [
        ("John", "john@example.com"),
        ("Rohan", "rohan@example.com"),
        ("amy", "amy@example.com"),
        ("Joe", "joe@example.com"),
    ] {
        persons.add_person(Some(person(name, email))).await.unwrap();
    }

    let filtered = persons
        .get_filtered_persons(PersonField::Name, Some("oh"))
        .await
        .unwrap();
    let sorted = persons.get_sorted_persons(
        filtered,
        Some(PersonField::Name),
        SortDirection::Descending,
    );

    let names: Vec<_> = sorted
        .iter()
        .map(|person| person.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["Rohan", "John"]);
}

#[tokio::test]
async fn unparseable_age_query_matches_nobody() {
    let h = harness(CacheConfig::default());
    let persons = &h.services.persons;
    persons
        .add_person(Some(person("Ana", "ana@example.com")))
        .await
        .unwrap();

    let found = persons
        .get_filtered_persons(PersonField::Age, Some("thirty"))
        .await
        .unwrap();
    assert!(found.is_empty());

    let everyone = persons
        .get_filtered_persons(PersonField::DateOfBirth, Some("not a date"))
        .await
        .unwrap();
    assert_eq!(everyone.len(), 1);
}

#[tokio::test]
async fn disabled_cache_reads_through() {
    let h = harness(CacheConfig {
        enabled: false,
        ..CacheConfig::default()
    });
    assert!(h.services.cache().is_none());

    h.services
        .countries
        .add_country(Some(CountryAddRequest::named("Chile")))
        .await
        .unwrap();
    h.services.countries.get_all_countries().await.unwrap();
    h.services.persons.get_all_persons().await.unwrap();

    assert!(h.cache.is_empty());
    assert!(h.cache.tracked_keys().is_empty());
}

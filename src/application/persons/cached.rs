use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::cache_aside::CacheAside;
use crate::application::repos::{PersonPredicate, PersonsRepo, RepoError};
use crate::cache::keys::{PERSONS_ALL, PERSONS_PATTERN, person_by_id};
use crate::domain::entities::PersonRecord;

/// Person store decorator that caches records, never projections, so derived
/// fields are still computed per read.
///
/// Reads go through `persons:all` and `persons:id:<uuid>`; every successful
/// write drops all `persons:*` entries.
#[derive(Clone)]
pub struct CachedPersonsRepo {
    inner: Arc<dyn PersonsRepo>,
    cache: CacheAside,
}

impl CachedPersonsRepo {
    pub fn new(inner: Arc<dyn PersonsRepo>, cache: CacheAside) -> Self {
        Self { inner, cache }
    }

    async fn cached_all(&self) -> Result<Vec<PersonRecord>, RepoError> {
        self.cache.load(PERSONS_ALL, || self.inner.list_all()).await
    }

    fn invalidate(&self) {
        self.cache.invalidate_matching(PERSONS_PATTERN);
    }
}

#[async_trait]
impl PersonsRepo for CachedPersonsRepo {
    async fn add_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError> {
        let added = self.inner.add_person(person).await?;
        self.invalidate();
        Ok(added)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersonRecord>, RepoError> {
        self.cache
            .load(&person_by_id(id), || self.inner.find_by_id(id))
            .await
    }

    async fn list_all(&self) -> Result<Vec<PersonRecord>, RepoError> {
        self.cached_all().await
    }

    async fn list_matching(
        &self,
        predicate: &PersonPredicate,
    ) -> Result<Vec<PersonRecord>, RepoError> {
        let persons = self.cached_all().await?;
        Ok(persons
            .into_iter()
            .filter(|person| predicate(person))
            .collect())
    }

    async fn update_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError> {
        let updated = self.inner.update_person(person).await?;
        self.invalidate();
        Ok(updated)
    }

    async fn delete_person(&self, id: Uuid) -> Result<bool, RepoError> {
        let deleted = self.inner.delete_person(id).await?;
        self.invalidate();
        Ok(deleted)
    }

    async fn exists_matching(&self, predicate: &PersonPredicate) -> Result<bool, RepoError> {
        let persons = self.cached_all().await?;
        Ok(persons.iter().any(|person| predicate(person)))
    }
}

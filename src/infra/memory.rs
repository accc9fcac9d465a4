//! In-process record store, used by tests and database-less callers.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::repos::{
    CountriesRepo, CountryPredicate, PersonPredicate, PersonsRepo, RepoError,
};
use crate::domain::entities::{CountryRecord, PersonRecord};

/// Insertion-ordered countries and persons behind async locks.
///
/// Person reads resolve `country_name` from the current countries; the stored
/// copy never carries one.
#[derive(Default)]
pub struct InMemoryRepositories {
    countries: RwLock<Vec<CountryRecord>>,
    persons: RwLock<Vec<PersonRecord>>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    async fn resolve(&self, mut persons: Vec<PersonRecord>) -> Vec<PersonRecord> {
        let countries = self.countries.read().await;
        for person in &mut persons {
            person.country_name = country_name(&countries, person.country_id);
        }
        persons
    }

    async fn resolve_one(&self, mut person: PersonRecord) -> PersonRecord {
        let countries = self.countries.read().await;
        person.country_name = country_name(&countries, person.country_id);
        person
    }

    fn ensure_unique_name(
        countries: &[CountryRecord],
        candidate: &CountryRecord,
    ) -> Result<(), RepoError> {
        if countries
            .iter()
            .any(|existing| existing.id == candidate.id || existing.name == candidate.name)
        {
            return Err(RepoError::Duplicate {
                constraint: "countries_name_key".to_string(),
            });
        }
        Ok(())
    }

    async fn ensure_country_exists(&self, country_id: Option<Uuid>) -> Result<(), RepoError> {
        let Some(id) = country_id else {
            return Ok(());
        };
        if self.countries.read().await.iter().any(|country| country.id == id) {
            Ok(())
        } else {
            Err(RepoError::InvalidInput {
                message: format!("country `{id}` does not exist"),
            })
        }
    }

    fn stored(mut person: PersonRecord) -> PersonRecord {
        person.country_name = None;
        person
    }
}

fn country_name(countries: &[CountryRecord], id: Option<Uuid>) -> Option<String> {
    let id = id?;
    countries
        .iter()
        .find(|country| country.id == id)
        .map(|country| country.name.clone())
}

#[async_trait]
impl CountriesRepo for InMemoryRepositories {
    async fn add_country(&self, country: CountryRecord) -> Result<CountryRecord, RepoError> {
        let mut countries = self.countries.write().await;
        Self::ensure_unique_name(&countries, &country)?;
        countries.push(country.clone());
        Ok(country)
    }

    async fn add_countries(
        &self,
        batch: Vec<CountryRecord>,
    ) -> Result<Vec<CountryRecord>, RepoError> {
        let mut countries = self.countries.write().await;
        let mut staged: Vec<CountryRecord> = Vec::with_capacity(batch.len());
        for country in &batch {
            Self::ensure_unique_name(&countries, country)?;
            Self::ensure_unique_name(&staged, country)?;
            staged.push(country.clone());
        }
        countries.extend(staged);
        Ok(batch)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CountryRecord>, RepoError> {
        Ok(self
            .countries
            .read()
            .await
            .iter()
            .find(|country| country.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<CountryRecord>, RepoError> {
        Ok(self.countries.read().await.clone())
    }

    async fn list_matching(
        &self,
        predicate: &CountryPredicate,
    ) -> Result<Vec<CountryRecord>, RepoError> {
        Ok(self
            .countries
            .read()
            .await
            .iter()
            .filter(|country| predicate(country))
            .cloned()
            .collect())
    }

    async fn exists_matching(&self, predicate: &CountryPredicate) -> Result<bool, RepoError> {
        Ok(self
            .countries
            .read()
            .await
            .iter()
            .any(|country| predicate(country)))
    }
}

#[async_trait]
impl PersonsRepo for InMemoryRepositories {
    async fn add_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError> {
        self.ensure_country_exists(person.country_id).await?;
        {
            let mut persons = self.persons.write().await;
            if persons.iter().any(|existing| existing.id == person.id) {
                return Err(RepoError::Duplicate {
                    constraint: "persons_pkey".to_string(),
                });
            }
            persons.push(Self::stored(person.clone()));
        }
        Ok(self.resolve_one(person).await)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersonRecord>, RepoError> {
        let found = self
            .persons
            .read()
            .await
            .iter()
            .find(|person| person.id == id)
            .cloned();
        match found {
            Some(person) => Ok(Some(self.resolve_one(person).await)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<PersonRecord>, RepoError> {
        let persons = self.persons.read().await.clone();
        Ok(self.resolve(persons).await)
    }

    async fn list_matching(
        &self,
        predicate: &PersonPredicate,
    ) -> Result<Vec<PersonRecord>, RepoError> {
        let persons = PersonsRepo::list_all(self).await?;
        Ok(persons
            .into_iter()
            .filter(|person| predicate(person))
            .collect())
    }

    async fn update_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError> {
        self.ensure_country_exists(person.country_id).await?;
        {
            let mut persons = self.persons.write().await;
            let slot = persons
                .iter_mut()
                .find(|stored| stored.id == person.id)
                .ok_or(RepoError::NotFound)?;
            *slot = Self::stored(person.clone());
        }
        Ok(self.resolve_one(person).await)
    }

    async fn delete_person(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut persons = self.persons.write().await;
        let before = persons.len();
        persons.retain(|person| person.id != id);
        Ok(persons.len() != before)
    }

    async fn exists_matching(&self, predicate: &PersonPredicate) -> Result<bool, RepoError> {
        let persons = PersonsRepo::list_all(self).await?;
        Ok(persons.iter().any(|person| predicate(person)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str) -> CountryRecord {
        CountryRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn person(name: &str, country_id: Option<Uuid>) -> PersonRecord {
        PersonRecord {
            id: Uuid::new_v4(),
            name: Some(name.to_string()),
            email: None,
            date_of_birth: None,
            gender: None,
            country_id,
            country_name: Some("ignored".into()),
            address: None,
            receive_newsletters: false,
        }
    }

    #[tokio::test]
    async fn country_names_are_unique() {
        let repo = InMemoryRepositories::new();
        repo.add_country(country("Chile")).await.unwrap();

        let err = repo.add_country(country("Chile")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn failed_batch_adds_nothing() {
        let repo = InMemoryRepositories::new();
        let err = repo
            .add_countries(vec![country("Peru"), country("Peru")])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate { .. }));
        assert!(CountriesRepo::list_all(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn person_reads_resolve_country_name() {
        let repo = InMemoryRepositories::new();
        let chile = repo.add_country(country("Chile")).await.unwrap();

        let added = repo.add_person(person("Ana", Some(chile.id))).await.unwrap();
        assert_eq!(added.country_name.as_deref(), Some("Chile"));

        let stateless = repo.add_person(person("Bo", None)).await.unwrap();
        assert_eq!(stateless.country_name, None);

        let listed = PersonsRepo::list_all(&repo).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, added.id);
    }

    #[tokio::test]
    async fn unknown_country_reference_is_rejected() {
        let repo = InMemoryRepositories::new();
        let err = repo
            .add_person(person("Ana", Some(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn update_and_delete_missing_person() {
        let repo = InMemoryRepositories::new();
        let err = repo.update_person(person("Ghost", None)).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
        assert!(!repo.delete_person(Uuid::new_v4()).await.unwrap());
    }
}

//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{CountryRecord, PersonRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

pub type CountryPredicate = dyn Fn(&CountryRecord) -> bool + Send + Sync;
pub type PersonPredicate = dyn Fn(&PersonRecord) -> bool + Send + Sync;

#[async_trait]
pub trait CountriesRepo: Send + Sync {
    async fn add_country(&self, country: CountryRecord) -> Result<CountryRecord, RepoError>;

    /// Inserts every country in one unit of work, in the given order.
    async fn add_countries(
        &self,
        countries: Vec<CountryRecord>,
    ) -> Result<Vec<CountryRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CountryRecord>, RepoError>;

    async fn list_all(&self) -> Result<Vec<CountryRecord>, RepoError>;

    async fn list_matching(
        &self,
        predicate: &CountryPredicate,
    ) -> Result<Vec<CountryRecord>, RepoError>;

    async fn exists_matching(&self, predicate: &CountryPredicate) -> Result<bool, RepoError>;
}

/// Person records are returned with `country_name` resolved from `country_id`.
#[async_trait]
pub trait PersonsRepo: Send + Sync {
    async fn add_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersonRecord>, RepoError>;

    async fn list_all(&self) -> Result<Vec<PersonRecord>, RepoError>;

    async fn list_matching(
        &self,
        predicate: &PersonPredicate,
    ) -> Result<Vec<PersonRecord>, RepoError>;

    /// Replaces every mutable field of the stored record. Fails with
    /// [`RepoError::NotFound`] when no record has `person.id`.
    async fn update_person(&self, person: PersonRecord) -> Result<PersonRecord, RepoError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_person(&self, id: Uuid) -> Result<bool, RepoError>;

    async fn exists_matching(&self, predicate: &PersonPredicate) -> Result<bool, RepoError>;
}

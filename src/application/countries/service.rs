use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::countries::types::{CountryAddRequest, CountryResponse};
use crate::application::error::AppError;
use crate::application::repos::{CountriesRepo, RepoError};
use crate::domain::entities::CountryRecord;
use crate::domain::validation::required_text;

#[async_trait]
pub trait CountriesService: Send + Sync {
    async fn add_country(
        &self,
        request: Option<CountryAddRequest>,
    ) -> Result<CountryResponse, AppError>;

    async fn get_all_countries(&self) -> Result<Vec<CountryResponse>, AppError>;

    /// `None` when `id` is absent or unknown.
    async fn get_country(&self, id: Option<Uuid>) -> Result<Option<CountryResponse>, AppError>;

    /// Adds every new, non-blank name and returns how many were added.
    async fn import_countries(&self, names: Vec<String>) -> Result<usize, AppError>;
}

/// Country operations served straight from the store.
#[derive(Clone)]
pub struct CountryService {
    repo: Arc<dyn CountriesRepo>,
}

impl CountryService {
    pub fn new(repo: Arc<dyn CountriesRepo>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CountriesService for CountryService {
    #[instrument(skip(self, request))]
    async fn add_country(
        &self,
        request: Option<CountryAddRequest>,
    ) -> Result<CountryResponse, AppError> {
        let request = request.ok_or(AppError::MissingArgument("request"))?;
        let name = required_text(request.name.as_deref(), "name")?.trim().to_string();

        let duplicate = {
            let name = name.clone();
            self.repo
                .exists_matching(&move |country: &CountryRecord| country.name == name)
                .await?
        };
        if duplicate {
            return Err(AppError::validation(format!(
                "country `{name}` already exists"
            )));
        }

        // A concurrent add can still win the unique constraint after the check above.
        let stored = match self
            .repo
            .add_country(CountryRecord {
                id: Uuid::new_v4(),
                name: name.clone(),
            })
            .await
        {
            Ok(stored) => stored,
            Err(RepoError::Duplicate { .. }) => {
                return Err(AppError::validation(format!(
                    "country `{name}` already exists"
                )));
            }
            Err(err) => return Err(err.into()),
        };
        info!(country_id = %stored.id, "Country added");
        Ok(CountryResponse::from(&stored))
    }

    #[instrument(skip(self))]
    async fn get_all_countries(&self) -> Result<Vec<CountryResponse>, AppError> {
        let countries = self.repo.list_all().await?;
        Ok(countries.iter().map(CountryResponse::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_country(&self, id: Option<Uuid>) -> Result<Option<CountryResponse>, AppError> {
        let Some(id) = id else {
            return Ok(None);
        };
        let country = self.repo.find_by_id(id).await?;
        Ok(country.as_ref().map(CountryResponse::from))
    }

    #[instrument(skip(self, names), fields(submitted = names.len()))]
    async fn import_countries(&self, names: Vec<String>) -> Result<usize, AppError> {
        let mut seen: HashSet<String> = self
            .repo
            .list_all()
            .await?
            .into_iter()
            .map(|country| country.name)
            .collect();

        let fresh: Vec<CountryRecord> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .map(|name| CountryRecord {
                id: Uuid::new_v4(),
                name,
            })
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }

        let added = self.repo.add_countries(fresh).await?.len();
        info!(added, "Countries imported");
        Ok(added)
    }
}

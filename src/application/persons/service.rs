use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::persons::filter::{PersonMatcher, person_matcher};
use crate::application::persons::sort::sort_persons;
use crate::application::persons::types::{PersonAddRequest, PersonResponse, PersonUpdateRequest};
use crate::application::repos::{CountriesRepo, PersonsRepo, RepoError};
use crate::domain::clock::Clock;
use crate::domain::entities::PersonRecord;
use crate::domain::types::{Gender, SearchField, SortDirection, SortField};
use crate::domain::validation::{
    ADDRESS_MAX_CHARS, EMAIL_MAX_CHARS, PERSON_NAME_MAX_CHARS, ensure_email, ensure_max_chars,
    normalize_optional, required_text,
};

/// Person CRUD plus search and ordering over projected persons.
#[derive(Clone)]
pub struct PersonService {
    persons: Arc<dyn PersonsRepo>,
    countries: Arc<dyn CountriesRepo>,
    clock: Arc<dyn Clock>,
}

/// Unvalidated field values shared by add and update requests.
struct PersonDraft {
    name: Option<String>,
    email: Option<String>,
    date_of_birth: Option<time::Date>,
    gender: Option<Gender>,
    country_id: Option<Uuid>,
    address: Option<String>,
    receive_newsletters: bool,
}

impl From<PersonAddRequest> for PersonDraft {
    fn from(request: PersonAddRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            date_of_birth: request.date_of_birth,
            gender: request.gender,
            country_id: request.country_id,
            address: request.address,
            receive_newsletters: request.receive_newsletters,
        }
    }
}

impl From<PersonUpdateRequest> for PersonDraft {
    fn from(request: PersonUpdateRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            date_of_birth: request.date_of_birth,
            gender: request.gender,
            country_id: request.country_id,
            address: request.address,
            receive_newsletters: request.receive_newsletters,
        }
    }
}

struct PersonFields {
    name: String,
    email: String,
    date_of_birth: Option<time::Date>,
    gender: Option<Gender>,
    country_id: Option<Uuid>,
    address: Option<String>,
    receive_newsletters: bool,
}

impl PersonService {
    pub fn new(
        persons: Arc<dyn PersonsRepo>,
        countries: Arc<dyn CountriesRepo>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            persons,
            countries,
            clock,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn add_person(
        &self,
        request: Option<PersonAddRequest>,
    ) -> Result<PersonResponse, AppError> {
        let request = request.ok_or(AppError::MissingArgument("request"))?;
        let fields = self.validate(PersonDraft::from(request)).await?;

        let stored = self
            .persons
            .add_person(fields.into_record(Uuid::new_v4()))
            .await?;
        info!(person_id = %stored.id, "Person added");
        Ok(self.project(&stored))
    }

    #[instrument(skip(self))]
    pub async fn get_all_persons(&self) -> Result<Vec<PersonResponse>, AppError> {
        let persons = self.persons.list_all().await?;
        Ok(self.project_all(&persons))
    }

    /// `None` when `id` is absent or unknown.
    #[instrument(skip(self))]
    pub async fn get_person(&self, id: Option<Uuid>) -> Result<Option<PersonResponse>, AppError> {
        let Some(id) = id else {
            return Ok(None);
        };
        let person = self.persons.find_by_id(id).await?;
        Ok(person.as_ref().map(|person| self.project(person)))
    }

    #[instrument(skip(self))]
    pub async fn get_filtered_persons(
        &self,
        field: SearchField,
        query: Option<&str>,
    ) -> Result<Vec<PersonResponse>, AppError> {
        let persons = match person_matcher(field, query, self.clock.today()) {
            PersonMatcher::All => self.persons.list_all().await?,
            PersonMatcher::Nothing => {
                debug!("Search query cannot match any person");
                Vec::new()
            }
            PersonMatcher::Matching(predicate) => self.persons.list_matching(&*predicate).await?,
        };
        Ok(self.project_all(&persons))
    }

    /// Orders an already projected list; see [`sort_persons`].
    pub fn get_sorted_persons(
        &self,
        persons: Vec<PersonResponse>,
        field: Option<SortField>,
        direction: SortDirection,
    ) -> Vec<PersonResponse> {
        sort_persons(persons, field, direction)
    }

    #[instrument(skip(self, request))]
    pub async fn update_person(
        &self,
        request: Option<PersonUpdateRequest>,
    ) -> Result<PersonResponse, AppError> {
        let request = request.ok_or(AppError::MissingArgument("request"))?;
        let id = request.id;
        let fields = self.validate(PersonDraft::from(request)).await?;

        if self.persons.find_by_id(id).await?.is_none() {
            return Err(AppError::InvalidReference {
                entity: "person",
                id,
            });
        }

        let updated = match self.persons.update_person(fields.into_record(id)).await {
            Ok(updated) => updated,
            Err(RepoError::NotFound) => {
                return Err(AppError::InvalidReference {
                    entity: "person",
                    id,
                });
            }
            Err(err) => return Err(err.into()),
        };
        info!(person_id = %id, "Person updated");
        Ok(self.project(&updated))
    }

    /// Returns `false` when `id` is absent or unknown.
    #[instrument(skip(self))]
    pub async fn delete_person(&self, id: Option<Uuid>) -> Result<bool, AppError> {
        let Some(id) = id else {
            return Ok(false);
        };
        if self.persons.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self.persons.delete_person(id).await?;
        if deleted {
            info!(person_id = %id, "Person deleted");
        }
        Ok(deleted)
    }

    fn project(&self, person: &PersonRecord) -> PersonResponse {
        PersonResponse::project(person, self.clock.today())
    }

    fn project_all(&self, persons: &[PersonRecord]) -> Vec<PersonResponse> {
        let today = self.clock.today();
        persons
            .iter()
            .map(|person| PersonResponse::project(person, today))
            .collect()
    }

    async fn validate(&self, draft: PersonDraft) -> Result<PersonFields, AppError> {
        let name = required_text(draft.name.as_deref(), "name")?.trim().to_string();
        ensure_max_chars(Some(&name), PERSON_NAME_MAX_CHARS, "name")?;

        let email = required_text(draft.email.as_deref(), "email")?.trim().to_string();
        ensure_email(&email, "email")?;
        ensure_max_chars(Some(&email), EMAIL_MAX_CHARS, "email")?;

        let address = normalize_optional(draft.address);
        ensure_max_chars(address.as_deref(), ADDRESS_MAX_CHARS, "address")?;

        if let Some(country_id) = draft.country_id {
            if self.countries.find_by_id(country_id).await?.is_none() {
                return Err(AppError::InvalidReference {
                    entity: "country",
                    id: country_id,
                });
            }
        }

        Ok(PersonFields {
            name,
            email,
            date_of_birth: draft.date_of_birth,
            gender: draft.gender,
            country_id: draft.country_id,
            address,
            receive_newsletters: draft.receive_newsletters,
        })
    }
}

impl PersonFields {
    fn into_record(self, id: Uuid) -> PersonRecord {
        PersonRecord {
            id,
            name: Some(self.name),
            email: Some(self.email),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            country_id: self.country_id,
            country_name: None,
            address: self.address,
            receive_newsletters: self.receive_newsletters,
        }
    }
}

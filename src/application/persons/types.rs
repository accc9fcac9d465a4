use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::domain::age::{age_on, serialize_date_of_birth};
use crate::domain::entities::PersonRecord;
use crate::domain::types::Gender;

#[derive(Debug, Clone, Default)]
pub struct PersonAddRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<Gender>,
    pub country_id: Option<Uuid>,
    pub address: Option<String>,
    pub receive_newsletters: bool,
}

/// Replacement values for every mutable field of person `id`.
#[derive(Debug, Clone)]
pub struct PersonUpdateRequest {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<Gender>,
    pub country_id: Option<Uuid>,
    pub address: Option<String>,
    pub receive_newsletters: bool,
}

/// Read-only view of a person with age computed against a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(serialize_with = "serialize_date_of_birth")]
    pub date_of_birth: Option<Date>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub country_id: Option<Uuid>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub receive_newsletters: bool,
}

impl PersonResponse {
    pub fn project(record: &PersonRecord, today: Date) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            date_of_birth: record.date_of_birth,
            age: record.date_of_birth.map(|dob| age_on(dob, today)),
            gender: record.gender.map(|gender| gender.to_string()),
            country_id: record.country_id,
            country: record.country_name.clone(),
            address: record.address.clone(),
            receive_newsletters: record.receive_newsletters,
        }
    }

    /// Update request that leaves every field as currently projected.
    pub fn to_update_request(&self) -> PersonUpdateRequest {
        PersonUpdateRequest {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.as_deref().and_then(|gender| gender.parse().ok()),
            country_id: self.country_id,
            address: self.address.clone(),
            receive_newsletters: self.receive_newsletters,
        }
    }
}

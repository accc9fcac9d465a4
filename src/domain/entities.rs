//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::domain::types::Gender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    pub id: Uuid,
    pub name: String,
}

/// A stored person.
///
/// `country_name` is resolved by the store from `country_id` when the record is
/// read; it is never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<Date>,
    pub gender: Option<Gender>,
    pub country_id: Option<Uuid>,
    pub country_name: Option<String>,
    pub address: Option<String>,
    pub receive_newsletters: bool,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::CountryRecord;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryAddRequest {
    pub name: Option<String>,
}

impl CountryAddRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&CountryRecord> for CountryResponse {
    fn from(record: &CountryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
        }
    }
}

//! Shared domain enumerations.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(DomainError::UnknownGender {
                value: value.to_string(),
            }),
        }
    }
}

/// Person attributes that can be searched or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonField {
    Name,
    Email,
    DateOfBirth,
    Age,
    Gender,
    Country,
    Address,
    ReceiveNewsletters,
}

pub type SearchField = PersonField;
pub type SortField = PersonField;

impl PersonField {
    pub const ALL: [PersonField; 8] = [
        PersonField::Name,
        PersonField::Email,
        PersonField::DateOfBirth,
        PersonField::Age,
        PersonField::Gender,
        PersonField::Country,
        PersonField::Address,
        PersonField::ReceiveNewsletters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PersonField::Name => "name",
            PersonField::Email => "email",
            PersonField::DateOfBirth => "date_of_birth",
            PersonField::Age => "age",
            PersonField::Gender => "gender",
            PersonField::Country => "country",
            PersonField::Address => "address",
            PersonField::ReceiveNewsletters => "receive_newsletters",
        }
    }
}

impl fmt::Display for PersonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonField {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "name" | "personname" => Ok(PersonField::Name),
            "email" => Ok(PersonField::Email),
            "dateofbirth" | "dob" => Ok(PersonField::DateOfBirth),
            "age" => Ok(PersonField::Age),
            "gender" => Ok(PersonField::Gender),
            "country" => Ok(PersonField::Country),
            "address" => Ok(PersonField::Address),
            "newsletter" | "receivenewsletter" | "receivenewsletters" => {
                Ok(PersonField::ReceiveNewsletters)
            }
            _ => Err(DomainError::UnknownField {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(DomainError::UnknownDirection {
                value: value.to_string(),
            }),
        }
    }
}

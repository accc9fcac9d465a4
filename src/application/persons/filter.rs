//! Search-field dispatch: turns a field and free-text query into a record predicate.
//!
//! Every query is answered; malformed input falls back per field instead of
//! failing. An unparseable date of birth leaves the set unfiltered, while an
//! unparseable age or newsletter flag matches nothing.

use time::Date;

use crate::application::repos::PersonPredicate;
use crate::domain::age::{age_on, parse_date_of_birth};
use crate::domain::entities::PersonRecord;
use crate::domain::types::SearchField;

/// Outcome of dispatching a search request.
pub enum PersonMatcher {
    /// No filtering applies.
    All,
    /// The query can never match.
    Nothing,
    Matching(Box<PersonPredicate>),
}

impl PersonMatcher {
    pub fn matches(&self, person: &PersonRecord) -> bool {
        match self {
            PersonMatcher::All => true,
            PersonMatcher::Nothing => false,
            PersonMatcher::Matching(predicate) => predicate(person),
        }
    }
}

impl std::fmt::Debug for PersonMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonMatcher::All => f.write_str("All"),
            PersonMatcher::Nothing => f.write_str("Nothing"),
            PersonMatcher::Matching(_) => f.write_str("Matching(..)"),
        }
    }
}

/// Builds the matcher for `field` and `query`, computing ages against `today`.
pub fn person_matcher(field: SearchField, query: Option<&str>, today: Date) -> PersonMatcher {
    let Some(query) = query.map(str::trim).filter(|query| !query.is_empty()) else {
        return PersonMatcher::All;
    };

    match field {
        SearchField::Name => contains(query, |person| person.name.as_deref()),
        SearchField::Email => contains(query, |person| person.email.as_deref()),
        SearchField::Address => contains(query, |person| person.address.as_deref()),
        SearchField::Country => contains(query, |person| person.country_name.as_deref()),
        SearchField::Gender => contains(query, |person| {
            person.gender.map(|gender| gender.as_str())
        }),
        SearchField::DateOfBirth => match parse_date_of_birth(query) {
            Some(wanted) => PersonMatcher::Matching(Box::new(move |person: &PersonRecord| {
                person.date_of_birth == Some(wanted)
            })),
            None => PersonMatcher::All,
        },
        SearchField::Age => match query.parse::<i32>() {
            Ok(wanted) => PersonMatcher::Matching(Box::new(move |person: &PersonRecord| {
                person
                    .date_of_birth
                    .is_some_and(|dob| age_on(dob, today) == wanted)
            })),
            Err(_) => PersonMatcher::Nothing,
        },
        SearchField::ReceiveNewsletters => match parse_flag(query) {
            Some(wanted) => PersonMatcher::Matching(Box::new(move |person: &PersonRecord| {
                person.receive_newsletters == wanted
            })),
            None => PersonMatcher::Nothing,
        },
    }
}

/// Applies the matcher for `field` and `query` to an already loaded set,
/// preserving input order.
pub fn filter_persons(
    persons: Vec<PersonRecord>,
    field: SearchField,
    query: Option<&str>,
    today: Date,
) -> Vec<PersonRecord> {
    match person_matcher(field, query, today) {
        PersonMatcher::All => persons,
        PersonMatcher::Nothing => Vec::new(),
        matcher => persons
            .into_iter()
            .filter(|person| matcher.matches(person))
            .collect(),
    }
}

fn contains<F>(query: &str, field: F) -> PersonMatcher
where
    F: Fn(&PersonRecord) -> Option<&str> + Send + Sync + 'static,
{
    let needle = query.to_lowercase();
    PersonMatcher::Matching(Box::new(move |person: &PersonRecord| {
        field(person).is_some_and(|value| value.to_lowercase().contains(&needle))
    }))
}

fn parse_flag(query: &str) -> Option<bool> {
    if query.eq_ignore_ascii_case("true") {
        Some(true)
    } else if query.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
